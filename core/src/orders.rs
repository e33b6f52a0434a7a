//! Placed orders: immutable records appended by the checkout flow.
//!
//! The cart subsystem only appends and reads orders. Status transitions
//! happen elsewhere (admin tooling), so no transition rules live here.

use crate::money::Money;
use crate::state::LineItem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a placed order.
///
/// The millisecond timestamp prefix keeps ids sortable by recency; the
/// random suffix keeps two orders placed in the same millisecond distinct.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(String);

impl OrderId {
    /// Creates an `OrderId` from an existing string.
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self(id)
    }

    /// Derives a fresh id from a creation timestamp.
    #[must_use]
    pub fn generate(placed_at: DateTime<Utc>) -> Self {
        let mut suffix = Uuid::new_v4().simple().to_string();
        suffix.truncate(8);
        Self(format!("{}-{suffix}", placed_at.timestamp_millis()))
    }

    /// Returns the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the shopper chose to pay.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Paid through the online payment flow.
    #[serde(rename = "online")]
    Online,
    /// Cash on delivery.
    #[serde(rename = "cod")]
    CashOnDelivery,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Online => write!(f, "online"),
            Self::CashOnDelivery => write!(f, "cod"),
        }
    }
}

/// Status of an order in its lifecycle.
///
/// Serialized kebab-case to match the persisted layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    /// Recorded, awaiting fulfillment.
    Pending,
    /// Payment is being processed by the gateway.
    ProcessingPayment,
    /// Handed to the carrier.
    Shipped,
    /// Received by the shopper.
    Delivered,
    /// Cancelled before delivery.
    Cancelled,
}

impl OrderStatus {
    /// Whether the order can still change status.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Delivered | Self::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::ProcessingPayment => write!(f, "processing-payment"),
            Self::Shipped => write!(f, "shipped"),
            Self::Delivered => write!(f, "delivered"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Recipient and address snapshot taken at checkout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingDetails {
    /// Recipient full name.
    pub full_name: String,
    /// Street address.
    pub street: String,
    /// City.
    pub city: String,
    /// Postal code.
    pub zip_code: String,
    /// Country.
    pub country: String,
    /// Contact phone number.
    pub phone: String,
}

/// An immutable record of a confirmed purchase.
///
/// `items` is an owned snapshot taken at confirmation time; later cart
/// mutations never reach it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order identifier, recency-sortable.
    pub id: OrderId,
    /// Line items as they were at confirmation.
    pub items: Vec<LineItem>,
    /// Sum of item line totals, excluding shipping.
    pub total_amount: Money,
    /// `total_amount` plus the shipping fee at order time.
    pub order_total: Money,
    /// Recipient and address snapshot.
    pub shipping_details: ShippingDetails,
    /// When the order was confirmed.
    pub order_date: DateTime<Utc>,
    /// How the shopper chose to pay.
    pub payment_method: PaymentMethod,
    /// Current lifecycle status.
    pub status: OrderStatus,
}

impl Order {
    /// Builds a consistent order at the checkout boundary: totals are
    /// computed from the item snapshot, the id and date are stamped from
    /// `placed_at`, and the status starts [`OrderStatus::Pending`].
    #[must_use]
    pub fn place(
        items: Vec<LineItem>,
        shipping_details: ShippingDetails,
        payment_method: PaymentMethod,
        shipping_fee: Money,
        placed_at: DateTime<Utc>,
    ) -> Self {
        let total_amount: Money = items.iter().map(LineItem::line_total).sum();
        Self {
            id: OrderId::generate(placed_at),
            items,
            total_amount,
            order_total: total_amount + shipping_fee,
            shipping_details,
            order_date: placed_at,
            payment_method,
            status: OrderStatus::Pending,
        }
    }
}
