//! `pim attribute`: list PIM attributes and show their values.

use clap::{Args, Subcommand};
use pim_client::attributes::{AttributeDetails, AttributeSummary, DEFAULT_ATTRIBUTE_LIMIT};
use pim_core::PimAttributeId;
use serde_json::{Map, Value};

use crate::{connect, EXIT_INVALID, EXIT_OK};

#[derive(Args, Debug)]
pub struct AttributeArgs {
    #[command(subcommand)]
    pub action: AttributeAction,
}

#[derive(Subcommand, Debug)]
pub enum AttributeAction {
    /// List attributes, most recently modified first.
    List {
        #[arg(long, default_value_t = DEFAULT_ATTRIBUTE_LIMIT)]
        limit: u32,
        /// Only the attribute with this code.
        #[arg(long)]
        code: Option<String>,
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Show one attribute and its values.
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },
}

pub async fn run_attribute(args: &AttributeArgs, base_url: Option<&str>) -> anyhow::Result<u8> {
    let client = connect(base_url)?;
    match &args.action {
        AttributeAction::List { limit, code, json } => {
            let mut filters = Map::new();
            if let Some(code) = code {
                filters.insert("attribute_code".into(), Value::from(code.as_str()));
            }
            let attrs = client.attributes().list(*limit, &filters).await?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&attrs)?);
            } else {
                print!("{}", render_list(&attrs));
            }
            Ok(EXIT_OK)
        }
        AttributeAction::Show { id, json } => {
            let id = PimAttributeId::new(id.as_str())?;
            let Some(details) = client.attributes().details(&id).await? else {
                println!("PIM Attribute {id} not found");
                return Ok(EXIT_INVALID);
            };
            if *json {
                println!("{}", serde_json::to_string_pretty(&details)?);
            } else {
                print!("{}", render_details(&details));
            }
            Ok(EXIT_OK)
        }
    }
}

fn render_list(attrs: &[AttributeSummary]) -> String {
    if attrs.is_empty() {
        return "No attributes found.\n".to_string();
    }
    let width = attrs
        .iter()
        .map(|a| a.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Attribute".len());
    let mut out = format!("{:<width$}  {:>6}  Last Modified\n", "Attribute", "Values");
    for attr in attrs {
        out.push_str(&format!(
            "{:<width$}  {:>6}  {}\n",
            attr.name,
            attr.values_count,
            attr.last_modified.as_deref().unwrap_or("-")
        ));
    }
    out
}

fn render_details(details: &AttributeDetails) -> String {
    let mut out = match &details.attribute_name {
        Some(label) => format!("{} ({label})\n", details.name),
        None => format!("{}\n", details.name),
    };
    out.push_str(&format!("{} values\n", details.values_count));
    for value in &details.values {
        let label = value.attribute_value_name.as_deref().unwrap_or(&value.name);
        out.push_str(&format!("  {label}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pim_client::attributes::ValueRef;

    fn summary(name: &str, values: u64, modified: Option<&str>) -> AttributeSummary {
        AttributeSummary {
            id: PimAttributeId::new(name).unwrap(),
            name: name.into(),
            attribute_name: None,
            values_count: values,
            last_modified: modified.map(Into::into),
            creation: None,
            modified: None,
        }
    }

    #[test]
    fn list_columns_align() {
        let text = render_list(&[
            summary("seat_height", 0, Some("Jan 2, 2026")),
            summary("color", 12, None),
        ]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Attribute    Values  Last Modified");
        assert_eq!(lines[1], "seat_height       0  Jan 2, 2026");
        assert_eq!(lines[2], "color            12  -");
    }

    #[test]
    fn empty_list_message() {
        assert_eq!(render_list(&[]), "No attributes found.\n");
    }

    #[test]
    fn details_fall_back_to_value_name() {
        let details = AttributeDetails {
            id: PimAttributeId::new("color").unwrap(),
            name: "color".into(),
            attribute_name: Some("Color".into()),
            values: vec![
                ValueRef {
                    name: "PAV-0001".into(),
                    attribute_value_name: Some("White".into()),
                    creation: None,
                    modified: None,
                },
                ValueRef {
                    name: "PAV-0002".into(),
                    attribute_value_name: None,
                    creation: None,
                    modified: None,
                },
            ],
            values_count: 2,
            creation: None,
            modified: None,
        };
        assert_eq!(
            render_details(&details),
            "color (Color)\n2 values\n  White\n  PAV-0002\n"
        );
    }
}
