use serde::{Deserialize, Serialize};

use crate::service::error::{AutofillError, AutofillResult};

pub const COMPLETE_AUTOFILL: &str = "complete_autofill";
pub const CALLER_INFO: &str = "autofill_caller_info";

/// Entry picked by the user in the authenticated UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AutofillSelection {
    Login {
        #[serde(default)]
        username: Option<String>,
        #[serde(default)]
        password: Option<String>,
    },
    /// Card partitions are not filled; decoding it is rejected by `login_selection`.
    CreditCard {},
}

/// Decode a completion payload and insist on the login partition.
pub fn login_selection(json_args: &str) -> AutofillResult<(Option<String>, Option<String>)> {
    let selection: AutofillSelection =
        serde_json::from_str(json_args).map_err(|source| AutofillError::Json {
            context: COMPLETE_AUTOFILL.to_string(),
            source,
        })?;

    match selection {
        AutofillSelection::Login { username, password } => Ok((username, password)),
        AutofillSelection::CreditCard {} => Err(AutofillError::InvalidCommandArgs {
            expected: "AutofillSelection::Login".to_string(),
            args: json_args.to_string(),
        }),
    }
}

/// Caller identity handed to the authenticated UI.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CallerInfo {
    pub uri: Option<String>,
    pub search_term: String,
}
