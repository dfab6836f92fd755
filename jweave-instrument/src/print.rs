//! Print synthesis: route a message operand to the global output stream.

use jweave_ir::{Instruction, InstructionBatch, InvokeExpr, Operand, Type};
use jweave_model::AnalysisContext;

use crate::error::Result;
use crate::temp::TempAllocator;

/// Append the fixed two-instruction print shape to `out`: load `System.out`
/// into a fresh temp, then `println` the message on it.
pub fn emit_print_into(
    message: Operand,
    ctx: &AnalysisContext,
    temps: &mut TempAllocator,
    out: &mut Vec<Instruction>,
) -> Result<()> {
    let out_field = ctx.field_ref("java.lang.System", "out")?;
    let stream = temps.fresh(Type::parse("java.io.PrintStream"));
    out.push(Instruction::LoadStaticField {
        dest: stream.clone(),
        field: out_field,
    });

    let println = ctx.method_ref("java.io.PrintStream", "println", &[Type::String])?;
    out.push(Instruction::Invoke(InvokeExpr::virtual_call(
        Operand::Temp(stream),
        println,
        vec![message],
    )));
    Ok(())
}

/// The print shape as a standalone batch.
pub fn emit_print(
    message: Operand,
    ctx: &AnalysisContext,
    temps: &mut TempAllocator,
) -> Result<InstructionBatch> {
    let mut out = Vec::new();
    emit_print_into(message, ctx, temps, &mut out)?;
    Ok(InstructionBatch {
        instructions: out,
        result: None,
    })
}
