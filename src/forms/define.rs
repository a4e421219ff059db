//! User function and constant definitions.

/// `name(p1,p2) = body`
pub fn function_fragment(name: &str, params: &[String], body: &str) -> String {
    format!("{}({}) = {}", name, params.join(","), body)
}

/// `name = body`
pub fn const_fragment(name: &str, body: &str) -> String {
    format!("{} = {}", name, body)
}
