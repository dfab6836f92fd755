use std::collections::HashSet;

use jweave_ir::{Temp, Type};
use jweave_model::MethodBody;

/// Allocates fresh typed temporaries for one method's instrumentation pass.
///
/// Names follow a `$wN` scheme but the only contract is collision-freedom
/// with the body's existing locals and with temps already issued here.
#[derive(Debug)]
pub struct TempAllocator {
    taken: HashSet<String>,
    next: usize,
}

impl TempAllocator {
    pub fn for_body(body: &MethodBody) -> TempAllocator {
        TempAllocator {
            taken: body.local_names().map(str::to_string).collect(),
            next: 0,
        }
    }

    pub fn fresh(&mut self, ty: Type) -> Temp {
        loop {
            let name = format!("$w{}", self.next);
            self.next += 1;
            if self.taken.insert(name.clone()) {
                return Temp::new(name, ty);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_existing_locals() {
        let mut body = MethodBody::new(None);
        body.declare_local(Temp::new("$w0", Type::String));
        body.declare_local(Temp::new("$w2", Type::String));

        let mut temps = TempAllocator::for_body(&body);
        let names: Vec<String> = (0..3).map(|_| temps.fresh(Type::String).name).collect();
        assert_eq!(names, vec!["$w1", "$w3", "$w4"]);
    }

    #[test]
    fn never_repeats() {
        let body = MethodBody::new(None);
        let mut temps = TempAllocator::for_body(&body);
        let mut seen = HashSet::new();
        for _ in 0..32 {
            assert!(seen.insert(temps.fresh(Type::String).name));
        }
    }
}
