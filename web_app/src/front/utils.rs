use fast_qr::{
    ECL,
    convert::{Builder, Shape, image::ImageBuilder},
    qr::QRBuilder,
};

use super::{errors, templates};

/// [ntext responder](ntex::web::HttpResponse) to redirect to `url`
pub fn redirect_to(url: &str) -> Result<ntex::web::HttpResponse, ntex::web::Error> {
    Ok(ntex::web::HttpResponse::SeeOther()
        .header("location", url)
        .finish())
}

/// Renders `template_name` into an html body
pub fn render_template(
    template_name: &str,
    context: &tera::Context,
) -> Result<String, errors::ServerError> {
    templates::WEB_TEMPLATES
        .render(template_name, context)
        .map_err(|e| {
            errors::ServerError::TemplateError(format!(
                "template {template_name} couldnt be rendered: {e}"
            ))
        })
}

/// PNG bytes of the QR code encoding `content`
pub fn get_qr_code(content: &str) -> anyhow::Result<Vec<u8>> {
    let qr_code = QRBuilder::new(content.as_bytes()).ecl(ECL::M).build()?;

    Ok(ImageBuilder::default()
        .shape(Shape::Square)
        .background_color("#ffffff") //hex value
        .module_color("#0b3d2e")
        .fit_width(400)
        .to_bytes(&qr_code)?)
}
