use crate::instruction::Instruction;
use crate::operand::Operand;

/// An ordered sequence of synthesized instructions plus the final
/// string-typed operand to print, if any.
///
/// Every temp appearing as an operand must be defined by an earlier
/// instruction in the same batch (or be a pre-existing local of the target
/// body); jump targets are batch-relative indices. Both are checked by body
/// validation after splicing.
#[derive(Debug, Clone, Default)]
pub struct InstructionBatch {
    pub instructions: Vec<Instruction>,
    pub result: Option<Operand>,
}

impl InstructionBatch {
    pub fn new() -> InstructionBatch {
        InstructionBatch::default()
    }

    pub fn push(&mut self, insn: Instruction) {
        self.instructions.push(insn);
    }

    /// Append another batch, rebasing its jump targets past this batch's
    /// instructions. Takes over the other batch's result operand.
    pub fn extend(&mut self, other: InstructionBatch) {
        let base = self.instructions.len();
        for mut insn in other.instructions {
            if let Some(target) = insn.jump_target_mut() {
                *target += base;
            }
            self.instructions.push(insn);
        }
        self.result = other.result;
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }
}
