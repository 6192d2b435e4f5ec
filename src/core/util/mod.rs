pub mod dns_util;
pub mod quantity_util;
