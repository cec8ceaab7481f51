//! Optional parse-validation of records while loading.
//!
//! Any failure here aborts the whole run.

use crate::tools::Verifier;
use crate::utils::config::PARSE_SUCCESS_MARKER;
use crate::utils::error::ValidationError;
use log::debug;

/// How (and whether) loaded records are checked with the verifier
#[derive(Clone, Copy, Default)]
pub enum Validation<'a> {
    #[default]
    Off,

    /// The verifier must report a successful parse of the LHS
    ParseOnly(&'a dyn Verifier),

    /// The RHS inferred by the verifier must equal the cached RHS exactly
    Verify(&'a dyn Verifier),
}

impl Validation<'_> {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Validation::Off)
    }

    /// Check one record
    pub fn check(&self, lhs: &str, rhs: &str) -> Result<(), ValidationError> {
        match self {
            Validation::Off => Ok(()),
            Validation::ParseOnly(verifier) => {
                let output = verifier.check_parse(lhs)?;
                if output.contains(PARSE_SUCCESS_MARKER) {
                    Ok(())
                } else {
                    Err(ValidationError::ParseFailed {
                        lhs: lhs.to_string(),
                        output,
                    })
                }
            }
            Validation::Verify(verifier) => {
                let inferred = verifier.infer_rhs(lhs)?;
                if inferred == rhs {
                    debug!("Verified RHS for {:?}", lhs);
                    Ok(())
                } else {
                    Err(ValidationError::Mismatch {
                        lhs: lhs.to_string(),
                        expected: rhs.to_string(),
                        actual: inferred,
                    })
                }
            }
        }
    }
}

impl std::fmt::Debug for Validation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Validation::Off => "Off",
            Validation::ParseOnly(_) => "ParseOnly",
            Validation::Verify(_) => "Verify",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ToolError;

    struct Echo(&'static str);

    impl Verifier for Echo {
        fn check_parse(&self, _lhs: &str) -> Result<String, ToolError> {
            Ok(self.0.to_string())
        }

        fn infer_rhs(&self, _lhs: &str) -> Result<String, ToolError> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_parse_only_needs_marker() {
        let ok = Echo("; parsing successful\n");
        let bad = Echo("error: unexpected token\n");

        assert!(Validation::ParseOnly(&ok).check("lhs", "rhs").is_ok());
        assert!(matches!(
            Validation::ParseOnly(&bad).check("lhs", "rhs"),
            Err(ValidationError::ParseFailed { .. })
        ));
    }

    #[test]
    fn test_verify_needs_exact_match() {
        let verifier = Echo("result %1\n");

        assert!(Validation::Verify(&verifier).check("lhs", "result %1\n").is_ok());
        assert!(matches!(
            Validation::Verify(&verifier).check("lhs", "result %1"),
            Err(ValidationError::Mismatch { .. })
        ));
    }

    #[test]
    fn test_off_never_fails() {
        assert!(Validation::Off.check("anything", "").is_ok());
        assert!(!Validation::Off.is_enabled());
    }
}
