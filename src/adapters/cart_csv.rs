use crate::domain::order::LineItem;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{validate_file_extensions, validate_path};
use std::io::Read;
use std::path::Path;

/// 讀取 `product,quantity,price` 格式的購物車
pub fn load_cart_csv<P: AsRef<Path>>(path: P) -> Result<Vec<LineItem>> {
    let display = path.as_ref().to_string_lossy().to_string();
    validate_path("cart", &display)?;
    validate_file_extensions("cart", std::slice::from_ref(&display), &["csv"])?;

    let file = std::fs::File::open(path.as_ref())?;
    read_cart(file)
}

pub fn read_cart<R: Read>(reader: R) -> Result<Vec<LineItem>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut cart = Vec::new();
    for (index, row) in rdr.deserialize::<LineItem>().enumerate() {
        let item = row?;
        if !item.price.is_finite() || item.price < 0.0 {
            return Err(AppError::validation(format!(
                "cart row {}: price must be a non-negative number, got {}",
                index + 1,
                item.price
            )));
        }
        cart.push(item);
    }

    tracing::debug!("Loaded {} cart lines", cart.len());
    Ok(cart)
}
