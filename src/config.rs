//! Safety-cap configuration. The crate has exactly one external tunable
//! (spec.md §3): `maxOccursBounds`.

use crate::state::Tunables;

const MAX_OCCURS_BOUNDS_VAR: &str = "DFDL_SEQ_MAX_OCCURS_BOUNDS";

impl Tunables {
    /// Builds `Tunables` from the environment, falling back to
    /// [`Default::default`] if [`MAX_OCCURS_BOUNDS_VAR`](MAX_OCCURS_BOUNDS_VAR)
    /// is unset or doesn't parse as a `u64`.
    pub fn from_env() -> Self {
        match std::env::var(MAX_OCCURS_BOUNDS_VAR) {
            Ok(raw) => match raw.parse() {
                Ok(max_occurs_bounds) => Tunables { max_occurs_bounds },
                Err(_) => {
                    tracing::warn!(
                        var = MAX_OCCURS_BOUNDS_VAR,
                        value = %raw,
                        "could not parse as u64, using default"
                    );
                    Tunables::default()
                }
            },
            Err(_) => Tunables::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_default_when_unset() {
        std::env::remove_var(MAX_OCCURS_BOUNDS_VAR);
        assert_eq!(Tunables::from_env(), Tunables::default());
    }

    #[test]
    fn reads_a_valid_value() {
        std::env::set_var(MAX_OCCURS_BOUNDS_VAR, "42");
        assert_eq!(
            Tunables::from_env(),
            Tunables {
                max_occurs_bounds: 42
            }
        );
        std::env::remove_var(MAX_OCCURS_BOUNDS_VAR);
    }

    #[test]
    fn falls_back_to_default_on_garbage() {
        std::env::set_var(MAX_OCCURS_BOUNDS_VAR, "not-a-number");
        assert_eq!(Tunables::from_env(), Tunables::default());
        std::env::remove_var(MAX_OCCURS_BOUNDS_VAR);
    }
}
