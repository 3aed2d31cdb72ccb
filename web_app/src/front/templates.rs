use std::sync::LazyLock;
use tera::Tera;

use crate::api::{catalog, dates};

fn format_cop_filter(
    value: &tera::Value,
    _: &std::collections::HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let amount = value
        .as_i64()
        .ok_or_else(|| tera::Error::msg("format_cop expects an integer amount"))?;

    Ok(tera::Value::String(catalog::format_cop(amount)))
}

fn long_date_filter(
    value: &tera::Value,
    _: &std::collections::HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let date = value
        .as_str()
        .and_then(|s| chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .ok_or_else(|| tera::Error::msg("long_date expects a YYYY-MM-DD date"))?;

    Ok(tera::Value::String(dates::format_long_date(date)))
}

pub static WEB_TEMPLATES: LazyLock<Tera> = LazyLock::new(|| {
    let mut tera = match Tera::new("web/templates/**/*.html") {
        Ok(tera) => tera,
        Err(e) => {
            log::error!("templates couldnt be loaded: {e}");
            Tera::default()
        }
    };
    tera.register_filter("format_cop", format_cop_filter);
    tera.register_filter("long_date", long_date_filter);

    tera
});
