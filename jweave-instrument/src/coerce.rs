//! String coercion: turn a typed operand into a string-valued one.

use jweave_ir::{Instruction, InvokeExpr, Operand, Type, ty};
use jweave_model::AnalysisContext;

use crate::error::{Error, Result};
use crate::temp::TempAllocator;

/// Coerce `op` to a string operand, appending conversion instructions to
/// `out`.
///
/// String operands pass through unchanged. Primitives go through the
/// matching `String.valueOf` overload; reference-typed values through a
/// virtual `Object.toString()`. Anything else (a null constant, a bare
/// static field reference) has no conversion and fails the probe.
pub fn coerce_to_string(
    op: Operand,
    ctx: &AnalysisContext,
    temps: &mut TempAllocator,
    out: &mut Vec<Instruction>,
) -> Result<Operand> {
    match op.ty() {
        Type::String => Ok(op),
        Type::Prim(kind) => {
            let value_of = ctx.method_ref(ty::STRING_CLASS, "valueOf", &[Type::Prim(kind)])?;
            let dest = temps.fresh(Type::String);
            out.push(Instruction::AssignInvoke {
                dest: dest.clone(),
                call: InvokeExpr::static_call(value_of, vec![op]),
            });
            Ok(Operand::Temp(dest))
        }
        Type::Ref(_) if op.is_value() => {
            let to_string = ctx.method_ref("java.lang.Object", "toString", &[])?;
            let dest = temps.fresh(Type::String);
            out.push(Instruction::AssignInvoke {
                dest: dest.clone(),
                call: InvokeExpr::virtual_call(op, to_string, vec![]),
            });
            Ok(Operand::Temp(dest))
        }
        _ => Err(Error::UnsupportedOperand {
            operand: op.to_string(),
            ty: op.ty().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jweave_ir::{FieldRef, PrimKind, Temp};
    use jweave_model::MethodBody;

    fn setup() -> (AnalysisContext, TempAllocator) {
        let ctx = AnalysisContext::with_runtime();
        let temps = TempAllocator::for_body(&MethodBody::new(None));
        (ctx, temps)
    }

    #[test]
    fn string_operand_is_identity() {
        let (ctx, mut temps) = setup();
        let mut out = Vec::new();
        let lit = Operand::StringLit("hello".to_string());
        let coerced = coerce_to_string(lit.clone(), &ctx, &mut temps, &mut out).unwrap();
        assert_eq!(coerced, lit);
        assert!(out.is_empty());
    }

    #[test]
    fn primitive_uses_value_of_overload() {
        let (ctx, mut temps) = setup();
        let mut out = Vec::new();
        let id = Operand::Temp(Temp::new("$w5", Type::Prim(PrimKind::Int)));
        // $w5 plays a pre-defined local here.
        let coerced = coerce_to_string(id, &ctx, &mut temps, &mut out).unwrap();
        assert_eq!(out.len(), 1);
        assert!(coerced.ty().is_string());
        assert_eq!(
            out[0].to_string(),
            "$w0 = staticinvoke <java.lang.String: java.lang.String valueOf(int)>($w5)"
        );
    }

    #[test]
    fn reference_uses_object_to_string() {
        let (ctx, mut temps) = setup();
        let mut out = Vec::new();
        let obj = Operand::Param {
            index: 0,
            ty: Type::parse("android.os.Bundle"),
        };
        let coerced = coerce_to_string(obj, &ctx, &mut temps, &mut out).unwrap();
        assert_eq!(out.len(), 1);
        assert!(coerced.ty().is_string());
        assert_eq!(
            out[0].to_string(),
            "$w0 = virtualinvoke @parameter0.<java.lang.Object: java.lang.String toString()>()"
        );
    }

    #[test]
    fn static_field_reference_is_unsupported() {
        let (ctx, mut temps) = setup();
        let mut out = Vec::new();
        let field = Operand::StaticField(FieldRef {
            class: "java.lang.System".to_string(),
            name: "out".to_string(),
            ty: Type::parse("java.io.PrintStream"),
        });
        let err = coerce_to_string(field, &ctx, &mut temps, &mut out).unwrap_err();
        assert!(matches!(err, Error::UnsupportedOperand { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn null_constant_is_unsupported() {
        let (ctx, mut temps) = setup();
        let mut out = Vec::new();
        let err = coerce_to_string(Operand::NullConst, &ctx, &mut temps, &mut out).unwrap_err();
        assert!(matches!(err, Error::UnsupportedOperand { .. }));
    }
}
