//! Route definitions for the PIM API stub.
//!
//! Whitelisted methods live under `/api/method/{method}`. Arguments come
//! from the query string and from a JSON object body, body winning on
//! conflicts. Results are wrapped as `{"message": ...}`; failures go through
//! [`AppError`] and render as the exception envelope.

use std::collections::{BTreeMap, HashMap};

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use pim_client::attributes::{
    AttributeDetails, AttributeSummary, AttributeValue, AttributeValueRecord, NewAttributeValue,
    ValueRef, DEFAULT_ATTRIBUTE_LIMIT, DEFAULT_VALUE_LIMIT, GET_ATTRIBUTE_DETAILS,
    GET_ATTRIBUTE_LIST, GET_ATTRIBUTE_VALUES, INSERT_ATTRIBUTE_VALUE,
};
use pim_client::items::{
    clean_item_filters, ItemPage, ItemRecord, SkuCheck, VendorInfo, DEFAULT_ITEM_LIMIT,
    GET_ITEMS, GET_VENDOR_INFO, INSERT_ITEM, VALIDATE_SKU,
};
use pim_client::mapping::{
    NewPimAttribute, NewVendorAttribute, UpdateMappingResponse, VendorAttributeRecord,
    GET_MAPPING_DATA, INSERT_PIM_ATTRIBUTE, INSERT_VENDOR_ATTRIBUTE, UPDATE_MAPPING,
};
use pim_client::vendors::{VendorSummary, DEFAULT_VENDOR_LIMIT, GET_VENDOR_LIST};
use pim_client::{
    MappingData, MessageBody, PimAttributeOption, PingResponse, VendorAttributeRow, PING,
};
use pim_core::{
    attribute_value_code, validate_code, vendor_attribute_code, ItemName, PimAttributeId,
    VendorAttributeId, VendorId,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::store::{
    AppState, StoredAttribute, StoredItem, StoredValue, ITEM_DOCTYPE, PIM_ATTRIBUTE_DOCTYPE,
    PIM_ATTRIBUTE_VALUE_DOCTYPE, VENDOR_ATTRIBUTE_DOCTYPE,
};

/// Build the complete router with all stub routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/method/{method}", get(call_method).post(call_method))
        .with_state(state)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn call_method(
    State(state): State<AppState>,
    Path(method): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Result<Json<MessageBody<Value>>, AppError> {
    let params = Params::merge(query, &body)?;
    tracing::debug!(method = %method, "dispatching method call");
    let message = dispatch(&state, &method, &params)?;
    Ok(Json(MessageBody { message }))
}

fn dispatch(state: &AppState, method: &str, params: &Params) -> Result<Value, AppError> {
    match method {
        PING => to_message(&ping()),
        GET_MAPPING_DATA => to_message(&mapping_data(state, params)?),
        UPDATE_MAPPING => to_message(&update_mapping(state, params)?),
        VALIDATE_SKU => to_message(&validate_sku(state, params)),
        GET_VENDOR_INFO => to_message(&vendor_info(state, params)),
        GET_VENDOR_LIST => to_message(&vendor_list(state, params)?),
        GET_ITEMS => to_message(&list_items(state, params)?),
        INSERT_ITEM => to_message(&insert_item(state, params)?),
        INSERT_VENDOR_ATTRIBUTE => to_message(&insert_vendor_attribute(state, params)?),
        INSERT_PIM_ATTRIBUTE => to_message(&insert_pim_attribute(state, params)?),
        GET_ATTRIBUTE_LIST => to_message(&attribute_list(state, params)?),
        GET_ATTRIBUTE_DETAILS => to_message(&attribute_details(state, params)?),
        GET_ATTRIBUTE_VALUES => to_message(&attribute_values(state, params)?),
        INSERT_ATTRIBUTE_VALUE => to_message(&insert_attribute_value(state, params)?),
        other => Err(AppError::NotFound(format!("Method {other} not found"))),
    }
}

fn to_message<T: Serialize>(value: &T) -> Result<Value, AppError> {
    Ok(serde_json::to_value(value)?)
}

// ── Arguments ───────────────────────────────────────────────────────

/// Merged call arguments.
struct Params(Map<String, Value>);

impl Params {
    fn merge(query: HashMap<String, String>, body: &[u8]) -> Result<Self, AppError> {
        let mut args: Map<String, Value> = query
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect();
        if !body.iter().all(u8::is_ascii_whitespace) {
            match serde_json::from_slice::<Value>(body) {
                Ok(Value::Object(fields)) => args.extend(fields),
                Ok(_) => {
                    return Err(AppError::BadRequest(
                        "request body must be a JSON object".into(),
                    ))
                }
                Err(e) => return Err(AppError::BadRequest(format!("invalid JSON body: {e}"))),
            }
        }
        Ok(Self(args))
    }

    /// Argument as text. Numbers and booleans are stringified; null is absent.
    fn text(&self, key: &str) -> Option<String> {
        self.0.get(key).and_then(value_text)
    }

    fn required(&self, key: &str) -> Result<String, AppError> {
        self.text(key)
            .ok_or_else(|| AppError::BadRequest(format!("missing required argument: '{key}'")))
    }

    /// 0/1 style flag.
    fn flag(&self, key: &str) -> bool {
        match self.0.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            Some(Value::String(s)) => matches!(s.trim(), "1" | "true" | "True"),
            _ => false,
        }
    }

    /// Non-negative integer argument. Zero and blank count as absent.
    fn count(&self, key: &str) -> Result<Option<u32>, AppError> {
        match self.text(key) {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map(|n| (n > 0).then_some(n))
                .map_err(|_| AppError::BadRequest(format!("'{key}' must be a non-negative integer"))),
        }
    }

    /// Object argument, given either as JSON or as a JSON-encoded string.
    fn object(&self, key: &str) -> Result<Map<String, Value>, String> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(Map::new()),
            Some(Value::Object(map)) => Ok(map.clone()),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(Map::new()),
            Some(Value::String(s)) => match serde_json::from_str::<Value>(s) {
                Ok(Value::Object(map)) => Ok(map),
                Ok(_) => Err(format!("'{key}' must be an object")),
                Err(e) => Err(e.to_string()),
            },
            Some(_) => Err(format!("'{key}' must be an object")),
        }
    }

    /// Deserialize the whole argument set as a record.
    fn record<T: DeserializeOwned>(&self) -> Result<T, AppError> {
        serde_json::from_value(Value::Object(self.0.clone()))
            .map_err(|e| AppError::BadRequest(e.to_string()))
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(u8::from(*b).to_string()),
        other => Some(other.to_string()),
    }
}

// ── Ping ────────────────────────────────────────────────────────────

fn ping() -> PingResponse {
    PingResponse {
        status: "ok".into(),
        message: "Imperium PIM API is running".into(),
        timestamp: Some(Utc::now().to_rfc3339()),
        version: Some("1.0.0".into()),
    }
}

// ── Attribute mapping ───────────────────────────────────────────────

fn mapping_data(state: &AppState, params: &Params) -> Result<MappingData, AppError> {
    let vendor = VendorId::new(params.required("vendor")?)?;
    let unmapped_only = params.flag("show_unmapped_only");

    let mappings: BTreeMap<VendorAttributeId, PimAttributeId> = state
        .mappings()
        .iter()
        .filter(|entry| entry.key().0 == vendor)
        .map(|entry| (entry.key().1.clone(), entry.value().clone()))
        .collect();

    let mut vendor_attributes: Vec<VendorAttributeRow> = state
        .vendor_attributes()
        .iter()
        .filter(|entry| entry.pim_vendor == vendor)
        .filter(|entry| !unmapped_only || !mappings.contains_key(&entry.name))
        .map(|entry| VendorAttributeRow {
            name: entry.name.clone(),
            vendor_attribute_name: entry.vendor_attribute_name.clone(),
            vendor_attribute_code: Some(entry.vendor_attribute_code.clone()),
        })
        .collect();
    vendor_attributes.sort_by(|a, b| {
        a.vendor_attribute_name
            .cmp(&b.vendor_attribute_name)
            .then_with(|| a.name.cmp(&b.name))
    });

    let mut pim_attributes: Vec<PimAttributeOption> = state
        .pim_attributes()
        .iter()
        .map(|entry| entry.record.clone())
        .collect();
    pim_attributes.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(MappingData {
        vendor_attributes,
        pim_attributes,
        mappings,
    })
}

fn update_mapping(state: &AppState, params: &Params) -> Result<UpdateMappingResponse, AppError> {
    let vendor = params.required("vendor")?;
    let vendor_attribute = params.required("vendor_attribute")?;
    let pim_attribute = params.required("pim_attribute")?;

    match apply_mapping(state, &vendor, &vendor_attribute, &pim_attribute) {
        Ok(message) => {
            tracing::info!(%vendor, %vendor_attribute, %pim_attribute, %message, "mapping updated");
            Ok(UpdateMappingResponse::ok(message))
        }
        Err(e) => {
            tracing::warn!(%vendor, %vendor_attribute, error = %e, "mapping update rejected");
            Ok(UpdateMappingResponse::failed(format!("Error updating mapping: {e}")))
        }
    }
}

fn apply_mapping(
    state: &AppState,
    vendor: &str,
    vendor_attribute: &str,
    pim_attribute: &str,
) -> Result<&'static str, String> {
    let vendor = VendorId::new(vendor).map_err(|e| e.to_string())?;
    let row = VendorAttributeId::new(vendor_attribute).map_err(|e| e.to_string())?;
    let key = (vendor.clone(), row.clone());

    if pim_attribute.trim().is_empty() {
        return Ok(match state.mappings().remove(&key) {
            Some(_) => "Attribute mapping removed successfully",
            None => "No mapping to remove",
        });
    }

    if !state.vendors().contains_key(&vendor) {
        return Err(format!("Could not find PIM Vendor: {vendor}"));
    }
    if !state.vendor_attributes().contains_key(&row) {
        return Err(format!("Could not find PIM Vendor Attribute: {row}"));
    }
    let target = PimAttributeId::new(pim_attribute).map_err(|e| e.to_string())?;
    if !state.pim_attributes().contains_key(&target) {
        return Err(format!("Could not find PIM Attribute: {target}"));
    }

    Ok(match state.mappings().insert(key, target) {
        Some(_) => "Attribute mapping updated successfully",
        None => "Attribute mapping created successfully",
    })
}

fn insert_vendor_attribute(
    state: &AppState,
    params: &Params,
) -> Result<VendorAttributeRecord, AppError> {
    let input: NewVendorAttribute = params.record()?;
    let vendor = state
        .vendors()
        .get(&input.pim_vendor)
        .map(|v| v.vendor_code.clone())
        .ok_or_else(|| {
            AppError::Validation(format!("Could not find PIM Vendor: {}", input.pim_vendor))
        })?;

    let code = match input.vendor_attribute_code.filter(|c| !c.trim().is_empty()) {
        Some(code) => code,
        None => vendor_attribute_code(&vendor, &input.vendor_attribute_name)?,
    };
    let name = VendorAttributeId::new(state.next_name("VA"))?;
    let record = VendorAttributeRecord {
        name: name.clone(),
        pim_vendor: input.pim_vendor,
        vendor_attribute_name: input.vendor_attribute_name,
        vendor_attribute_code: code,
    };
    state.vendor_attributes().insert(name.clone(), record.clone());

    let mut fields = Map::new();
    fields.insert("pim_vendor".into(), Value::from(record.pim_vendor.as_str()));
    state.publish(VENDOR_ATTRIBUTE_DOCTYPE, name.as_str(), fields);
    tracing::info!(name = %name, code = %record.vendor_attribute_code, "vendor attribute created");
    Ok(record)
}

fn insert_pim_attribute(
    state: &AppState,
    params: &Params,
) -> Result<PimAttributeOption, AppError> {
    let input: NewPimAttribute = params.record()?;
    validate_code(&input.attribute_code)?;
    // The code doubles as the record name.
    let name = PimAttributeId::new(input.attribute_code.clone())?;
    if state.pim_attributes().contains_key(&name) {
        return Err(AppError::Conflict(format!(
            "PIM Attribute {name} already exists"
        )));
    }
    let record = PimAttributeOption {
        name: name.clone(),
        attribute_name: input.attribute_name,
        attribute_code: Some(input.attribute_code),
    };
    state
        .pim_attributes()
        .insert(name.clone(), StoredAttribute::new(record.clone(), Utc::now()));
    state.publish(PIM_ATTRIBUTE_DOCTYPE, name.as_str(), Map::new());
    tracing::info!(name = %name, "PIM attribute created");
    Ok(record)
}

// ── Attributes ──────────────────────────────────────────────────────

const ATTRIBUTE_FILTER_FIELDS: [&str; 3] = ["name", "attribute_name", "attribute_code"];

/// Timestamp in the framework's datetime format.
fn frappe_datetime(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
}

/// Medium date for list displays, e.g. `Jan 2, 2026`.
fn display_date(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}

fn attribute_field(record: &PimAttributeOption, key: &str) -> Option<String> {
    match key {
        "name" => Some(record.name.to_string()),
        "attribute_name" => Some(record.attribute_name.clone()),
        "attribute_code" => record.attribute_code.clone(),
        _ => None,
    }
}

fn attribute_list(state: &AppState, params: &Params) -> Result<Vec<AttributeSummary>, AppError> {
    let limit = params.count("limit")?.unwrap_or(DEFAULT_ATTRIBUTE_LIMIT);
    let filters = match params.object("filters") {
        Ok(filters) => filters,
        Err(error) => {
            tracing::warn!(%error, "error getting attribute list");
            return Ok(Vec::new());
        }
    };
    if let Some(field) = filters
        .keys()
        .find(|key| !ATTRIBUTE_FILTER_FIELDS.contains(&key.as_str()))
    {
        tracing::warn!(%field, "error getting attribute list: unknown filter field");
        return Ok(Vec::new());
    }

    let mut matched: Vec<StoredAttribute> = state
        .pim_attributes()
        .iter()
        .filter(|entry| {
            filters
                .iter()
                .all(|(key, wanted)| attribute_field(&entry.record, key) == value_text(wanted))
        })
        .map(|entry| entry.value().clone())
        .collect();
    matched.sort_by(|a, b| {
        b.modified
            .cmp(&a.modified)
            .then_with(|| a.record.name.cmp(&b.record.name))
    });

    Ok(matched
        .into_iter()
        .take(limit as usize)
        .map(|attr| AttributeSummary {
            values_count: state.value_count(&attr.record.name),
            id: attr.record.name.clone(),
            name: attr.record.name.to_string(),
            attribute_name: Some(attr.record.attribute_name),
            last_modified: Some(display_date(attr.modified)),
            creation: Some(frappe_datetime(attr.created)),
            modified: Some(frappe_datetime(attr.modified)),
        })
        .collect())
}

/// Values of `parent`, or of every attribute, ordered by parent then age.
fn child_values(state: &AppState, parent: Option<&PimAttributeId>) -> Vec<StoredValue> {
    let mut values: Vec<StoredValue> = state
        .attribute_values()
        .iter()
        .filter(|entry| parent.map_or(true, |p| &entry.record.pim_attribute == p))
        .map(|entry| entry.value().clone())
        .collect();
    values.sort_by(|a, b| {
        a.record
            .pim_attribute
            .cmp(&b.record.pim_attribute)
            .then_with(|| a.created.cmp(&b.created))
            .then_with(|| a.record.name.cmp(&b.record.name))
    });
    values
}

fn attribute_details(
    state: &AppState,
    params: &Params,
) -> Result<Option<AttributeDetails>, AppError> {
    let raw = params.required("attribute_id")?;
    let found = PimAttributeId::new(raw.as_str())
        .ok()
        .and_then(|id| state.pim_attributes().get(&id).map(|e| e.value().clone()));
    let Some(attr) = found else {
        tracing::warn!(attribute = %raw, "error getting attribute details: not found");
        return Ok(None);
    };

    let values: Vec<ValueRef> = child_values(state, Some(&attr.record.name))
        .into_iter()
        .map(|v| ValueRef {
            name: v.record.name,
            attribute_value_name: Some(v.record.attribute_value_name),
            creation: Some(frappe_datetime(v.created)),
            modified: Some(frappe_datetime(v.modified)),
        })
        .collect();
    Ok(Some(AttributeDetails {
        id: attr.record.name.clone(),
        name: attr.record.name.to_string(),
        attribute_name: Some(attr.record.attribute_name),
        values_count: values.len() as u64,
        values,
        creation: Some(frappe_datetime(attr.created)),
        modified: Some(frappe_datetime(attr.modified)),
    }))
}

fn attribute_values(state: &AppState, params: &Params) -> Result<Vec<AttributeValue>, AppError> {
    let limit = params.count("limit")?.unwrap_or(DEFAULT_VALUE_LIMIT);
    let parent = match params.text("attribute_id").filter(|s| !s.trim().is_empty()) {
        Some(raw) => Some(PimAttributeId::new(raw)?),
        None => None,
    };

    Ok(child_values(state, parent.as_ref())
        .into_iter()
        .take(limit as usize)
        .map(|v| AttributeValue {
            id: v.record.name.clone(),
            name: v.record.name,
            attribute_name: v.record.pim_attribute,
            attribute_value_name: Some(v.record.attribute_value_name),
            attribute_value_code: Some(v.record.attribute_value_code),
            last_modified: Some(display_date(v.modified)),
            creation: Some(frappe_datetime(v.created)),
            modified: Some(frappe_datetime(v.modified)),
        })
        .collect())
}

fn insert_attribute_value(
    state: &AppState,
    params: &Params,
) -> Result<AttributeValueRecord, AppError> {
    let input: NewAttributeValue = params.record()?;
    if input.attribute_value_name.trim().is_empty() {
        return Err(AppError::Validation(
            "Attribute Value Name is required".into(),
        ));
    }
    let parent_code = state
        .pim_attributes()
        .get(&input.pim_attribute)
        .map(|attr| {
            attr.record
                .attribute_code
                .clone()
                .unwrap_or_else(|| attr.record.name.to_string())
        })
        .ok_or_else(|| {
            AppError::Validation(format!(
                "Could not find PIM Attribute: {}",
                input.pim_attribute
            ))
        })?;

    let code = match input.attribute_value_code.filter(|c| !c.trim().is_empty()) {
        Some(code) => code,
        None => attribute_value_code(&parent_code, &input.attribute_value_name),
    };
    let now = Utc::now();
    let name = state.next_name("PAV");
    let record = AttributeValueRecord {
        name: name.clone(),
        pim_attribute: input.pim_attribute,
        attribute_value_name: input.attribute_value_name,
        attribute_value_code: code,
    };
    state.attribute_values().insert(
        name.clone(),
        StoredValue {
            record: record.clone(),
            created: now,
            modified: now,
        },
    );
    // Saving a child row touches the parent.
    if let Some(mut parent) = state.pim_attributes().get_mut(&record.pim_attribute) {
        parent.modified = now;
    }

    let mut fields = Map::new();
    fields.insert("parent".into(), Value::from(record.pim_attribute.as_str()));
    state.publish(PIM_ATTRIBUTE_VALUE_DOCTYPE, &name, fields);
    tracing::info!(name = %name, code = %record.attribute_value_code, "attribute value created");
    Ok(record)
}

// ── Items ───────────────────────────────────────────────────────────

fn validate_sku(state: &AppState, params: &Params) -> SkuCheck {
    let sku = params.text("sku").unwrap_or_default();
    if sku.is_empty() {
        return SkuCheck {
            valid: true,
            message: None,
            error: None,
        };
    }
    let current = params.text("current_name").filter(|n| !n.is_empty());
    let exists = state.items().iter().any(|entry| {
        entry.record.sku.as_deref() == Some(sku.as_str())
            && current.as_deref() != Some(entry.key().as_str())
    });
    SkuCheck {
        valid: !exists,
        message: Some(if exists {
            format!("SKU '{sku}' already exists")
        } else {
            "SKU is available".to_string()
        }),
        error: None,
    }
}

fn vendor_info(state: &AppState, params: &Params) -> VendorInfo {
    let not_found = |message: String| VendorInfo {
        success: false,
        vendor_name: None,
        vendor_code: None,
        vendor_active: false,
        message: Some(message),
        error: None,
    };
    let code = params.text("vendor_code").unwrap_or_default();
    let Ok(id) = VendorId::new(code.clone()) else {
        return not_found("Vendor code is required".into());
    };
    match state.vendors().get(&id) {
        Some(vendor) => VendorInfo {
            success: true,
            vendor_name: Some(vendor.vendor_name.clone()),
            vendor_code: Some(vendor.vendor_code.clone()),
            vendor_active: vendor.vendor_active,
            message: None,
            error: None,
        },
        None => not_found(format!("Vendor '{code}' not found")),
    }
}

fn list_items(state: &AppState, params: &Params) -> Result<ItemPage, AppError> {
    let filters = match params.object("filters") {
        Ok(raw) => clean_item_filters(&raw),
        Err(error) => {
            tracing::warn!(%error, "rejecting malformed item filters");
            return Ok(ItemPage {
                success: false,
                error: Some(error),
                message: Some("An error occurred while retrieving items".into()),
                ..Default::default()
            });
        }
    };
    let limit = params.count("limit")?.unwrap_or(DEFAULT_ITEM_LIMIT);
    let offset = params.count("offset")?.unwrap_or(0);

    let mut matched: Vec<StoredItem> = state
        .items()
        .iter()
        .filter(|entry| {
            filters.iter().all(|(key, wanted)| {
                entry.record.filter_value(key) == value_text(wanted).as_deref()
            })
        })
        .map(|entry| entry.value().clone())
        .collect();
    matched.sort_by(|a, b| b.modified.cmp(&a.modified));

    let total_count = matched.len() as u64;
    let data: Vec<ItemRecord> = matched
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .map(|item| item.record)
        .collect();

    Ok(ItemPage {
        success: true,
        returned_count: data.len() as u64,
        data,
        total_count,
        filters_applied: filters,
        limit,
        offset,
        error: None,
        message: None,
    })
}

fn insert_item(state: &AppState, params: &Params) -> Result<ItemRecord, AppError> {
    let mut record: ItemRecord = params.record()?;
    record.apply_save_rules()?;

    let name = match record.name.take() {
        Some(name) => name,
        None => match record.sku.as_deref().filter(|s| !s.is_empty()) {
            Some(sku) => ItemName::new(sku)?,
            None => ItemName::new(state.next_name("ITEM"))?,
        },
    };
    if state.items().contains_key(&name) {
        return Err(AppError::Conflict(format!("PIM Item {name} already exists")));
    }
    record.name = Some(name.clone());
    state.items().insert(
        name.clone(),
        StoredItem {
            record: record.clone(),
            modified: Utc::now(),
        },
    );
    state.publish(ITEM_DOCTYPE, name.as_str(), Map::new());
    tracing::info!(name = %name, sku = ?record.sku, "item created");
    Ok(record)
}

// ── Vendors ─────────────────────────────────────────────────────────

fn vendor_list(state: &AppState, params: &Params) -> Result<Vec<VendorSummary>, AppError> {
    let limit = params.count("limit")?.unwrap_or(DEFAULT_VENDOR_LIMIT);
    let filters = match params.object("filters") {
        Ok(filters) => filters,
        Err(error) => {
            tracing::warn!(%error, "error getting vendor list");
            return Ok(Vec::new());
        }
    };

    let mut vendors = Vec::new();
    for entry in state.vendors().iter() {
        let vendor = entry.value();
        let mut keep = true;
        for (key, wanted) in &filters {
            let actual = match key.as_str() {
                "vendor_active" => Value::from(u8::from(vendor.vendor_active)),
                "vendor_integration_enabled" => {
                    Value::from(u8::from(vendor.vendor_integration_enabled))
                }
                "vendor_code" => Value::from(vendor.vendor_code.as_str()),
                "vendor_name" => Value::from(vendor.vendor_name.as_str()),
                other => {
                    tracing::warn!(field = other, "error getting vendor list: unknown filter field");
                    return Ok(Vec::new());
                }
            };
            if value_text(&actual) != value_text(wanted) {
                keep = false;
            }
        }
        if keep {
            vendors.push(vendor.clone());
        }
    }
    vendors.sort_by(|a, b| b.modified.cmp(&a.modified));

    Ok(vendors
        .into_iter()
        .take(limit as usize)
        .map(|v| VendorSummary {
            id: v.name,
            name: Some(v.vendor_name),
            code: Some(v.vendor_code),
            active: v.vendor_active,
            integration_enabled: v.vendor_integration_enabled,
        })
        .collect())
}
