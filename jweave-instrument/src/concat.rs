//! The builder-protocol string concatenation.

use jweave_ir::{Instruction, InstructionBatch, InvokeExpr, Operand, Type};
use jweave_model::AnalysisContext;

use crate::coerce::coerce_to_string;
use crate::error::Result;
use crate::temp::TempAllocator;

pub const BUILDER_CLASS: &str = "java.lang.StringBuilder";

/// Concatenate `left` (already string-typed) with `right`, appending the
/// instructions to `out`. Returns the string temp holding the result.
///
/// Fixed shape: construct the builder, initialize it with `left`, coerce
/// `right` (0 or 1 instruction), append, extract. Four instructions when
/// `right` is already a string, five otherwise.
pub fn concatenate_into(
    left: Operand,
    right: Operand,
    ctx: &AnalysisContext,
    temps: &mut TempAllocator,
    out: &mut Vec<Instruction>,
) -> Result<Operand> {
    let builder_ty = Type::parse(BUILDER_CLASS);
    let builder = temps.fresh(builder_ty.clone());
    out.push(Instruction::NewObject {
        dest: builder.clone(),
        class: BUILDER_CLASS.to_string(),
    });

    let init = ctx.method_ref(BUILDER_CLASS, "<init>", &[Type::String])?;
    out.push(Instruction::Invoke(InvokeExpr::special_call(
        Operand::Temp(builder.clone()),
        init,
        vec![left],
    )));

    let coerced = coerce_to_string(right, ctx, temps, out)?;

    let append = ctx.method_ref(BUILDER_CLASS, "append", &[Type::String])?;
    let discarded = temps.fresh(builder_ty);
    out.push(Instruction::AssignInvoke {
        dest: discarded,
        call: InvokeExpr::virtual_call(Operand::Temp(builder.clone()), append, vec![coerced]),
    });

    let to_string = ctx.method_ref(BUILDER_CLASS, "toString", &[])?;
    let result = temps.fresh(Type::String);
    out.push(Instruction::AssignInvoke {
        dest: result.clone(),
        call: InvokeExpr::virtual_call(Operand::Temp(builder), to_string, vec![]),
    });
    Ok(Operand::Temp(result))
}

/// Concatenate into a standalone batch whose result operand is the
/// concatenated string.
pub fn concatenate(
    left: Operand,
    right: Operand,
    ctx: &AnalysisContext,
    temps: &mut TempAllocator,
) -> Result<InstructionBatch> {
    let mut out = Vec::new();
    let result = concatenate_into(left, right, ctx, temps, &mut out)?;
    Ok(InstructionBatch {
        instructions: out,
        result: Some(result),
    })
}
