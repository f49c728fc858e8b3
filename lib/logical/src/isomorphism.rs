use crate::Pattern;
use rustc_hash::FxHashMap;
use sparql_algebra_model::Term;

/// Checks whether two sets of patterns are equal up to a bijective renaming of variables and blank
/// nodes.
///
/// A variable or blank node may be mapped to either a variable or a blank node. All other terms
/// must be equal. The order of the patterns is irrelevant.
pub fn is_isomorphic(left: &[Pattern], right: &[Pattern]) -> bool {
    if left.len() != right.len() {
        return false;
    }

    let mut used = vec![false; right.len()];
    match_from(left, right, &mut used, &Bijection::default())
}

#[derive(Clone, Default)]
struct Bijection<'a> {
    forward: FxHashMap<&'a Term, &'a Term>,
    backward: FxHashMap<&'a Term, &'a Term>,
}

impl<'a> Bijection<'a> {
    fn bind(&mut self, left: &'a Term, right: &'a Term) -> bool {
        if !left.is_renameable() || !right.is_renameable() {
            return left == right;
        }

        match (self.forward.get(left), self.backward.get(right)) {
            (Some(mapped_left), Some(mapped_right)) => {
                *mapped_left == right && *mapped_right == left
            }
            (None, None) => {
                self.forward.insert(left, right);
                self.backward.insert(right, left);
                true
            }
            _ => false,
        }
    }

    fn bind_pattern(&mut self, left: &'a Pattern, right: &'a Pattern) -> bool {
        left.terms()
            .zip(right.terms())
            .all(|(left, right)| self.bind(left, right))
    }
}

fn match_from<'a>(
    left: &'a [Pattern],
    right: &'a [Pattern],
    used: &mut [bool],
    bijection: &Bijection<'a>,
) -> bool {
    let Some((pattern, rest)) = left.split_first() else {
        return true;
    };

    for (index, candidate) in right.iter().enumerate() {
        if used[index] {
            continue;
        }

        let mut extended = bijection.clone();
        if extended.bind_pattern(pattern, candidate) {
            used[index] = true;
            if match_from(rest, right, used, &extended) {
                return true;
            }
            used[index] = false;
        }
    }
    false
}
