//! Upstream `showItems` product records and the reduced item shape returned
//! to callers.
//!
//! ## Observed shape of `cart.prodList` entries
//!
//! Field types are not stable across products or locales:
//! - `prodQty` may be a number or a label such as `"12 pcs"`.
//! - `shipWeightLbs` may be a number or a string with thousands separators
//!   (`"1,250"`).
//! - Price fields are numbers but may be `0` on free items, which must not
//!   be confused with a missing price.
//!
//! Every field is therefore kept as an optional raw [`serde_json::Value`].
//! JSON `null` and an absent key both deserialize to `None`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single product from the upstream `cart.prodList` array.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamProduct {
    pub front_img: Option<Value>,
    pub display_name: Option<Value>,
    pub prod_name: Option<Value>,
    pub pid: Option<Value>,
    pub list_price_raw_amount: Option<Value>,
    pub retail_price_raw_amount: Option<Value>,
    pub list_price_post_discount_raw_amount: Option<Value>,
    /// Part number, exposed to callers as `skucode`.
    pub pn: Option<Value>,
    pub prod_qty: Option<Value>,
    pub ship_weight_lbs: Option<Value>,
}

/// One item of a successful relay response.
///
/// All keys are always serialized; missing source values become `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayItem {
    pub img: Option<Value>,
    pub name: Option<Value>,
    pub sku: Option<Value>,
    pub retail_price: Option<Value>,
    pub sale_price: Option<Value>,
    pub skucode: Option<Value>,
    pub quantity: Option<Value>,
    pub weight: Option<Value>,
}
