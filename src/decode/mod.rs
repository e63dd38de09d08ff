//! Response decoder module
//!
//! Supports: XML (game API, EVE-Central), JSON (EVE-Marketdata)
//!
//! # Overview
//!
//! Both formats are parsed into the same [`Node`] tree, so typed results are
//! written once against [`Node`] / [`Row`] and work with either serializer.
//! Repeated records under a named group decode into an order-preserving
//! [`RowSet`].

mod decoders;
mod node;
mod rowset;
mod types;

pub use decoders::{JsonSerializer, XmlSerializer};
pub use node::Node;
pub use rowset::{decode_elements, decode_rowset, FromRow, Row, RowSet};
pub use types::{deserialize, serializer_for, Format, FromNode, Serializer};

#[cfg(test)]
mod tests;
