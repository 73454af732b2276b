use heck::{ToKebabCase, ToLowerCamelCase, ToPascalCase, ToSnakeCase};

use crate::ir::NormalizedName;

/// Create a `NormalizedName` from an arbitrary string, computing all casing variants.
pub fn normalize_name(name: &str) -> NormalizedName {
    let sanitized = sanitize_identifier(name);

    NormalizedName {
        original: name.to_string(),
        pascal_case: sanitized.to_pascal_case(),
        camel_case: sanitized.to_lower_camel_case(),
        snake_case: sanitized.to_snake_case(),
        kebab_case: sanitized.to_kebab_case(),
    }
}

/// Derive an operation identifier from HTTP method + path.
///
/// The lower-cased method is followed by every path segment in PascalCase;
/// `{param}` placeholders become `By<Param>`.
///
/// - `GET /pets` → `getPets`
/// - `GET /pets/{id}` → `getPetsById`
/// - `POST /api/v1/company/list` → `postApiV1CompanyList`
/// - `DELETE /store/order/{order_id}` → `deleteStoreOrderByOrderId`
pub fn synthesize_operation_id(method: &str, path: &str) -> String {
    let mut id = method.to_lowercase();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        match segment
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
        {
            Some(param) => {
                id.push_str("By");
                id.push_str(&param.to_pascal_case());
            }
            None => id.push_str(&segment.to_pascal_case()),
        }
    }
    id
}

/// Make a schema name usable as a type identifier: `.`, `-` and spaces become `_`.
///
/// `company_dto.CompanyResponse` → `company_dto_CompanyResponse`
pub fn sanitize_type_name(name: &str) -> String {
    name.replace(['.', '-', ' '], "_")
}

/// Sanitize a string to be a valid identifier.
fn sanitize_identifier(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut prev_was_separator = false;

    for (i, ch) in name.chars().enumerate() {
        if ch.is_alphanumeric() {
            if i == 0 && ch.is_ascii_digit() {
                result.push('_');
            }
            if prev_was_separator && !result.is_empty() {
                result.push('_');
            }
            result.push(ch);
            prev_was_separator = false;
        } else {
            prev_was_separator = true;
        }
    }

    if result.is_empty() {
        return "unnamed".to_string();
    }

    result
}
