use serde::Serialize;
use serde_json::json;

use fieldcheck_core::{ErrorKind, FromParam, Violation};

/// Closed set of model names.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelName {
    Alexnet,
    Resnet,
    Lenet,
}

impl ModelName {
    pub const ALL: [ModelName; 3] = [ModelName::Alexnet, ModelName::Resnet, ModelName::Lenet];

    pub fn as_str(self) -> &'static str {
        match self {
            ModelName::Alexnet => "alexnet",
            ModelName::Resnet => "resnet",
            ModelName::Lenet => "lenet",
        }
    }

    /// Canned message shown for each model.
    pub fn message(self) -> &'static str {
        match self {
            ModelName::Alexnet => "Deep Learning FTW!",
            ModelName::Lenet => "LeCNN all the images",
            ModelName::Resnet => "Have some residuals",
        }
    }
}

fn expected() -> String {
    let quoted: Vec<String> = ModelName::ALL.iter().map(|m| format!("'{}'", m.as_str())).collect();
    match quoted.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} or {last}", rest.join(", ")),
        _ => quoted.join(""),
    }
}

impl FromParam for ModelName {
    fn from_param(raw: &str) -> Result<Self, Violation> {
        ModelName::ALL
            .into_iter()
            .find(|m| m.as_str() == raw)
            .ok_or_else(|| {
                let expected = expected();
                Violation::new(ErrorKind::Enum, format!("Input should be {expected}"))
                    .with_ctx(json!({ "expected": expected }))
            })
    }
}

impl core::fmt::Display for ModelName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_only_members() {
        assert_eq!(ModelName::from_param("alexnet").unwrap(), ModelName::Alexnet);
        assert_eq!(ModelName::from_param("lenet").unwrap(), ModelName::Lenet);

        let err = ModelName::from_param("AlexNet").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Enum);
        assert_eq!(err.msg, "Input should be 'alexnet', 'resnet' or 'lenet'");
    }

    #[test]
    fn messages_are_distinct() {
        assert_eq!(ModelName::Alexnet.message(), "Deep Learning FTW!");
        assert_eq!(ModelName::Lenet.message(), "LeCNN all the images");
        assert_eq!(ModelName::Resnet.message(), "Have some residuals");
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_value(ModelName::Resnet).unwrap(), "resnet");
    }
}
