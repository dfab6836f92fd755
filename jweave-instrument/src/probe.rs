//! Probe synthesis: decide what one method's probe records and build the
//! instruction sequence that computes and prints it.

use jweave_ir::{
    Instruction, InstructionBatch, InvokeExpr, Operand, PrimKind, Temp, Type,
};
use jweave_model::{AnalysisContext, ClassModel, MethodBody, MethodModel};

use crate::concat::concatenate_into;
use crate::config::InstrumentConfig;
use crate::error::Result;
use crate::fragment;
use crate::print::emit_print_into;
use crate::temp::TempAllocator;

/// Message tags. Wire contract for downstream log consumers; preserved
/// verbatim.
pub const ACTIVITY_TAG: &str = "<ACTIVITY>";
pub const FRAGMENT_TAG: &str = "<FRAGMENT>";
pub const METHOD_TAG: &str = "<METHOD>";
pub const CONTROL_TAG: &str = "<CONTROL>";

pub const VIEW_CLASS: &str = "android.view.View";
pub const MENU_ITEM_CLASS: &str = "android.view.MenuItem";

/// Which control type the method's first parameter carries.
enum ControlParam {
    View,
    MenuItem,
}

/// Builds the instruction batch for one eligible method.
pub struct ProbeSynthesizer<'a> {
    ctx: &'a AnalysisContext,
    config: &'a InstrumentConfig,
}

impl<'a> ProbeSynthesizer<'a> {
    pub fn new(ctx: &'a AnalysisContext, config: &'a InstrumentConfig) -> ProbeSynthesizer<'a> {
        ProbeSynthesizer { ctx, config }
    }

    /// Build the probe for `method`. The batch ends with a print of the
    /// result operand; lifecycle and fragment methods get an extra preface
    /// probe ahead of the generic one.
    pub fn build_probe(
        &self,
        class: &ClassModel,
        method: &MethodModel,
        body: &MethodBody,
    ) -> Result<InstructionBatch> {
        let mut temps = TempAllocator::for_body(body);
        let mut out = Vec::new();

        if method.name == self.config.lifecycle_hook
            && let Some(this_op) = body.this_operand()
        {
            let name = runtime_class_name(this_op, self.ctx, &mut temps, &mut out)?;
            let message = concatenate_into(
                Operand::StringLit(format!("{ACTIVITY_TAG} Activity: ")),
                Operand::Temp(name),
                self.ctx,
                &mut temps,
                &mut out,
            )?;
            emit_print_into(message, self.ctx, &mut temps, &mut out)?;
        }

        if method.name == self.config.view_create_hook
            && let Some(this_op) = body.this_operand()
        {
            let link = fragment::link_host(self.ctx, self.config, class, this_op, &mut temps)?;
            let base = out.len();
            for mut insn in link.instructions {
                if let Some(target) = insn.jump_target_mut() {
                    *target += base;
                }
                out.push(insn);
            }
        }

        let signature = method.signature(&class.name);
        let message = match control_param(method) {
            Some(control) => {
                let id = self.control_id(control, method, &mut temps, &mut out)?;
                concatenate_into(
                    Operand::StringLit(format!("{CONTROL_TAG} Method: {signature} View: ")),
                    Operand::Temp(id),
                    self.ctx,
                    &mut temps,
                    &mut out,
                )?
            }
            None => Operand::StringLit(format!("{METHOD_TAG} Method: {signature}")),
        };
        emit_print_into(message.clone(), self.ctx, &mut temps, &mut out)?;

        Ok(InstructionBatch {
            instructions: out,
            result: Some(message),
        })
    }

    /// Fetch the control's integer identifier from the first parameter.
    /// Views dispatch virtually, menu items through the interface.
    fn control_id(
        &self,
        control: ControlParam,
        method: &MethodModel,
        temps: &mut TempAllocator,
        out: &mut Vec<Instruction>,
    ) -> Result<Temp> {
        let param = Operand::Param {
            index: 0,
            ty: method.params[0].clone(),
        };
        let call = match control {
            ControlParam::View => {
                let get_id = self.ctx.method_ref(VIEW_CLASS, "getId", &[])?;
                InvokeExpr::virtual_call(param, get_id, vec![])
            }
            ControlParam::MenuItem => {
                let get_item_id = self.ctx.method_ref(MENU_ITEM_CLASS, "getItemId", &[])?;
                InvokeExpr::interface_call(param, get_item_id, vec![])
            }
        };
        let id = temps.fresh(Type::Prim(PrimKind::Int));
        out.push(Instruction::AssignInvoke {
            dest: id.clone(),
            call,
        });
        Ok(id)
    }
}

fn control_param(method: &MethodModel) -> Option<ControlParam> {
    match method.params.first().and_then(Type::class_name) {
        Some(VIEW_CLASS) => Some(ControlParam::View),
        Some(MENU_ITEM_CLASS) => Some(ControlParam::MenuItem),
        _ => None,
    }
}

/// `getClass()` then `getName()` on `value`; returns the string temp holding
/// the runtime class name.
pub(crate) fn runtime_class_name(
    value: Operand,
    ctx: &AnalysisContext,
    temps: &mut TempAllocator,
    out: &mut Vec<Instruction>,
) -> Result<Temp> {
    let get_class = ctx.method_ref("java.lang.Object", "getClass", &[])?;
    let class_temp = temps.fresh(Type::parse("java.lang.Class"));
    out.push(Instruction::AssignInvoke {
        dest: class_temp.clone(),
        call: InvokeExpr::virtual_call(value, get_class, vec![]),
    });

    let get_name = ctx.method_ref("java.lang.Class", "getName", &[])?;
    let name_temp = temps.fresh(Type::String);
    out.push(Instruction::AssignInvoke {
        dest: name_temp.clone(),
        call: InvokeExpr::virtual_call(Operand::Temp(class_temp), get_name, vec![]),
    });
    Ok(name_temp)
}
