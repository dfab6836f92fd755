//! Fragment-host link: a probe naming the fragment and, when resolvable at
//! runtime, its hosting container.

use jweave_ir::{Instruction, InstructionBatch, InvokeExpr, MethodRef, Operand, Type};
use jweave_model::{AnalysisContext, ClassModel};

use crate::concat::BUILDER_CLASS;
use crate::config::InstrumentConfig;
use crate::error::{Error, Result};
use crate::probe::{FRAGMENT_TAG, runtime_class_name};
use crate::temp::TempAllocator;

/// Build the fragment probe.
///
/// The base message (`"<FRAGMENT> Fragment: "` plus the instance's runtime
/// class name) is always built and always printed. When an ancestor exposes
/// the host accessor, a second segment (`" Activity: "` plus the host's
/// runtime class name) is appended under a null guard: if the accessor
/// returns null the guard jumps straight to the terminal `toString`, so the
/// shorter message still prints. A missing accessor degrades to the base
/// message with a warning; it is never an error for the caller.
pub fn link_host(
    ctx: &AnalysisContext,
    config: &InstrumentConfig,
    class: &ClassModel,
    this_op: Operand,
    temps: &mut TempAllocator,
) -> Result<InstructionBatch> {
    let builder_ty = Type::parse(BUILDER_CLASS);
    let mut out = Vec::new();

    let builder = temps.fresh(builder_ty.clone());
    out.push(Instruction::NewObject {
        dest: builder.clone(),
        class: BUILDER_CLASS.to_string(),
    });
    let init = ctx.method_ref(BUILDER_CLASS, "<init>", &[Type::String])?;
    out.push(Instruction::Invoke(InvokeExpr::special_call(
        Operand::Temp(builder.clone()),
        init,
        vec![Operand::StringLit(format!("{FRAGMENT_TAG} Fragment: "))],
    )));

    let append = ctx.method_ref(BUILDER_CLASS, "append", &[Type::String])?;
    let name = runtime_class_name(this_op.clone(), ctx, temps, &mut out)?;
    let discarded = temps.fresh(builder_ty.clone());
    out.push(Instruction::AssignInvoke {
        dest: discarded,
        call: InvokeExpr::virtual_call(
            Operand::Temp(builder.clone()),
            append.clone(),
            vec![Operand::Temp(name)],
        ),
    });

    // Guarded host segment, if an ancestor exposes the accessor.
    let mut guard = None;
    match find_host_accessor(ctx, class, &config.host_accessor) {
        Ok(accessor) => {
            let host = temps.fresh(accessor.ret.clone());
            out.push(Instruction::AssignInvoke {
                dest: host.clone(),
                call: InvokeExpr::virtual_call(this_op, accessor, vec![]),
            });
            let guard_at = out.len();

            let discarded = temps.fresh(builder_ty.clone());
            out.push(Instruction::AssignInvoke {
                dest: discarded,
                call: InvokeExpr::virtual_call(
                    Operand::Temp(builder.clone()),
                    append.clone(),
                    vec![Operand::StringLit(" Activity: ".to_string())],
                ),
            });
            let host_name = runtime_class_name(Operand::Temp(host.clone()), ctx, temps, &mut out)?;
            let discarded = temps.fresh(builder_ty);
            out.push(Instruction::AssignInvoke {
                dest: discarded,
                call: InvokeExpr::virtual_call(
                    Operand::Temp(builder.clone()),
                    append,
                    vec![Operand::Temp(host_name)],
                ),
            });
            guard = Some((guard_at, host));
        }
        Err(err @ Error::MissingAccessor { .. }) => {
            log::warn!("{err}; emitting base fragment message only");
        }
        Err(other) => return Err(other),
    }

    let to_string = ctx.method_ref(BUILDER_CLASS, "toString", &[])?;
    let to_string_at = out.len();
    let result = temps.fresh(Type::String);
    out.push(Instruction::AssignInvoke {
        dest: result.clone(),
        call: InvokeExpr::virtual_call(Operand::Temp(builder), to_string, vec![]),
    });

    crate::print::emit_print_into(Operand::Temp(result.clone()), ctx, temps, &mut out)?;

    // The guard skips only the host segment; the inserted jump shifts the
    // terminal toString by one.
    if let Some((guard_at, host)) = guard {
        out.insert(
            guard_at,
            Instruction::IfNullJump {
                value: Operand::Temp(host),
                target: to_string_at + 1,
            },
        );
    }

    Ok(InstructionBatch {
        instructions: out,
        result: Some(Operand::Temp(result)),
    })
}

/// Walk the ancestor chain (excluding the type itself, never searching the
/// root) for a zero-argument accessor with the configured name.
fn find_host_accessor(
    ctx: &AnalysisContext,
    class: &ClassModel,
    accessor: &str,
) -> Result<MethodRef> {
    if class.superclass.is_none() {
        log::warn!("class '{}' has no superclass", class.name);
    } else {
        for ancestor in ctx.ancestors(&class.name) {
            if ancestor.superclass.is_none() {
                break;
            }
            if let Some(found) = ancestor.method(accessor, &[]) {
                return Ok(found.as_ref(&ancestor.name));
            }
        }
    }
    Err(Error::MissingAccessor {
        class: class.name.clone(),
        accessor: accessor.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jweave_model::{MethodBody, Modifiers};

    fn fragment_class(ctx: &mut AnalysisContext, superclass: Option<&str>) -> ClassModel {
        let class = ClassModel {
            name: "com.example.app.DetailFragment".to_string(),
            superclass: superclass.map(str::to_string),
            modifiers: Modifiers::PUBLIC,
            fields: vec![],
            methods: vec![],
        };
        ctx.declare(class.clone());
        class
    }

    fn this_op(class: &ClassModel) -> Operand {
        Operand::This {
            ty: Type::parse(&class.name),
        }
    }

    #[test]
    fn accessor_found_adds_guarded_segment() {
        let mut ctx = AnalysisContext::with_runtime();
        let class = fragment_class(&mut ctx, Some("android.app.Fragment"));
        let mut temps = TempAllocator::for_body(&MethodBody::new(None));

        let batch = link_host(
            &ctx,
            &InstrumentConfig::default(),
            &class,
            this_op(&class),
            &mut temps,
        )
        .unwrap();

        // new, init, getClass, getName, append, host call, guard, append,
        // getClass, getName, append, toString, print pair.
        assert_eq!(batch.len(), 14);
        let guard_at = batch
            .iter()
            .position(|i| matches!(i, Instruction::IfNullJump { .. }))
            .unwrap();
        assert_eq!(guard_at, 6);
        let target = batch.instructions[guard_at].jump_target().unwrap();
        assert!(batch.instructions[target].to_string().contains("toString"));
        // The print pair sits after the guard's target.
        assert!(target + 2 < batch.len());
        assert!(
            batch.instructions[target + 2]
                .to_string()
                .contains("println")
        );
    }

    #[test]
    fn accessor_missing_degrades_to_base_message() {
        let mut ctx = AnalysisContext::with_runtime();
        // Chain without any getActivity: Object only.
        ctx.declare(ClassModel {
            name: "com.example.app.PlainBase".to_string(),
            superclass: Some("java.lang.Object".to_string()),
            modifiers: Modifiers::PUBLIC,
            fields: vec![],
            methods: vec![],
        });
        let class = fragment_class(&mut ctx, Some("com.example.app.PlainBase"));
        let mut temps = TempAllocator::for_body(&MethodBody::new(None));

        let batch = link_host(
            &ctx,
            &InstrumentConfig::default(),
            &class,
            this_op(&class),
            &mut temps,
        )
        .unwrap();

        // new, init, getClass, getName, append, toString, print pair.
        assert_eq!(batch.len(), 8);
        assert!(
            !batch
                .iter()
                .any(|i| matches!(i, Instruction::IfNullJump { .. }))
        );
        assert!(batch.instructions[7].to_string().contains("println"));
    }

    #[test]
    fn no_superclass_degrades_too() {
        let mut ctx = AnalysisContext::with_runtime();
        let class = fragment_class(&mut ctx, None);
        let mut temps = TempAllocator::for_body(&MethodBody::new(None));

        let batch = link_host(
            &ctx,
            &InstrumentConfig::default(),
            &class,
            this_op(&class),
            &mut temps,
        )
        .unwrap();
        assert_eq!(batch.len(), 8);
    }
}
