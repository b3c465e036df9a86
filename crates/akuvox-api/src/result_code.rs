// Result-code registry
//
// Every cloud response carries a numeric `result` field. This module owns
// the static code table and turns a code (plus an optional server-supplied
// message) into an outcome. Codes absent from the table never fail a
// request -- only mapped, non-zero codes do.

/// Result code of a successful call.
pub const RESULT_OK: i64 = 0;
/// Invalid username or password.
pub const RESULT_INVALID_CREDENTIALS: i64 = 1;
/// Invalid identity (account not valid for the requested resource).
pub const RESULT_INVALID_IDENTITY: i64 = 2;
/// Sentinel substituted when a response carries no result field at all.
pub const RESULT_UNKNOWN: i64 = -1;

/// Classified outcome of a result code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Success, or an unmapped code (pass-through).
    Ok,
    /// The credentials or session token were rejected.
    AuthFailure(String),
    /// Any other mapped, non-success code.
    Failure { code: i64, message: String },
}

/// Default message for a mapped code; `None` when the code is unmapped.
fn default_message(code: i64) -> Option<&'static str> {
    match code {
        RESULT_OK => Some("success"),
        RESULT_INVALID_CREDENTIALS => Some("invalid username or password"),
        RESULT_INVALID_IDENTITY => Some("invalid identity"),
        RESULT_UNKNOWN => Some("unknown error"),
        _ => None,
    }
}

/// Classify a result code together with an optional explicit message.
///
/// Unmapped codes classify as [`Outcome::Ok`] regardless of value; the
/// server's `message` field, when present, replaces the table default.
pub fn classify(code: i64, explicit_message: Option<&str>) -> Outcome {
    let Some(default) = default_message(code) else {
        return Outcome::Ok;
    };
    if code == RESULT_OK {
        return Outcome::Ok;
    }
    let message = explicit_message.unwrap_or(default).to_owned();
    if code == RESULT_INVALID_CREDENTIALS {
        Outcome::AuthFailure(message)
    } else {
        Outcome::Failure { code, message }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn success_code_is_ok() {
        assert_eq!(classify(RESULT_OK, None), Outcome::Ok);
        // An explicit message on a success code changes nothing.
        assert_eq!(classify(RESULT_OK, Some("fine")), Outcome::Ok);
    }

    #[test]
    fn invalid_credentials_is_auth_failure() {
        assert_eq!(
            classify(RESULT_INVALID_CREDENTIALS, None),
            Outcome::AuthFailure("invalid username or password".into())
        );
    }

    #[test]
    fn explicit_message_overrides_table_default() {
        assert_eq!(
            classify(RESULT_INVALID_CREDENTIALS, Some("account locked")),
            Outcome::AuthFailure("account locked".into())
        );
        assert_eq!(
            classify(RESULT_INVALID_IDENTITY, Some("wrong community")),
            Outcome::Failure {
                code: RESULT_INVALID_IDENTITY,
                message: "wrong community".into()
            }
        );
    }

    #[test]
    fn mapped_non_auth_codes_are_failures() {
        assert_eq!(
            classify(RESULT_INVALID_IDENTITY, None),
            Outcome::Failure {
                code: RESULT_INVALID_IDENTITY,
                message: "invalid identity".into()
            }
        );
        assert_eq!(
            classify(RESULT_UNKNOWN, None),
            Outcome::Failure {
                code: RESULT_UNKNOWN,
                message: "unknown error".into()
            }
        );
    }

    #[test]
    fn unmapped_codes_pass_through() {
        for code in [3, 42, 999, -2, i64::MAX] {
            assert_eq!(classify(code, None), Outcome::Ok, "code {code}");
            assert_eq!(classify(code, Some("ignored")), Outcome::Ok, "code {code}");
        }
    }
}
