pub mod locator;
pub mod sales;
