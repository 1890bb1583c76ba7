pub const DEFAULT_GREETING: &str = "Hello World!!";

pub fn greeting(name: Option<&str>) -> String {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => format!("Hello {}!!", name),
        None => DEFAULT_GREETING.to_string(),
    }
}
