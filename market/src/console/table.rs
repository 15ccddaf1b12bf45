//! Tab-separated product tables.

use crate::actions::ProductView;

pub const PRODUCT_HEADER: &str =
    "Number\tName\tDescription\tPrice\tBidder name\tBidder email\tBid price";

pub const PURCHASE_HEADER: &str =
    "Number\tSeller Email\tName\tDescription\tList Price\tAmount Paid\tDelivery Option";

const EMPTY: &str = "-";

fn or_dash<T: ToString>(value: Option<&T>) -> String {
    value.map_or_else(|| EMPTY.to_string(), ToString::to_string)
}

/// Numbered rows (from 1) with product and bid columns, header first.
pub fn product_table(products: &[ProductView]) -> Vec<String> {
    let rows = products.iter().enumerate().map(|(i, p)| {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            i + 1,
            p.name,
            p.description,
            p.price,
            or_dash(p.bidder_name.as_ref()),
            or_dash(p.bidder_email.as_ref()),
            or_dash(p.bid_amount.as_ref()),
        )
    });
    std::iter::once(PRODUCT_HEADER.to_string())
        .chain(rows)
        .collect()
}

/// Numbered purchase rows with the amount paid and delivery option, header first.
pub fn purchase_table(products: &[ProductView]) -> Vec<String> {
    let rows = products.iter().enumerate().map(|(i, p)| {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            i + 1,
            p.seller,
            p.name,
            p.description,
            p.price,
            or_dash(p.bid_amount.as_ref()),
            or_dash(p.delivery.as_ref()),
        )
    });
    std::iter::once(PURCHASE_HEADER.to_string())
        .chain(rows)
        .collect()
}
