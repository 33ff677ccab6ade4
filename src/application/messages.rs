//! Fixed-text messages built from canonical results.
//!
//! Every field is substituted as-is, sentinel included, so the recipient
//! always sees the same structure.

use crate::domain::quote::{Estimate, Quote};

/// WhatsApp text asking for a personalized quote.
pub fn build_share_message(quote: &Quote) -> String {
    format!(
        "Hola! Me interesa una cotización personalizada para mi proyecto de construcción:

📋 *Detalles del Proyecto:*
• Tipo: {construction_type}
• Área: {area}
• Pisos: {floors}
• Terminación: {finish_level}
• Ubicación: {location}

💰 *Cotización Estimada:*
• Total: {total_cost}
• Tiempo: {estimated_time}

👤 *Mis Datos:*
• Nombre: {client_name}
• Email: {client_email}
• Teléfono: {client_phone}

¿Podrían contactarme para coordinar una reunión y discutir los detalles? ¡Gracias!",
        construction_type = quote.construction_type,
        area = quote.area,
        floors = quote.floors,
        finish_level = quote.finish_level,
        location = quote.location,
        total_cost = quote.total_cost,
        estimated_time = quote.estimated_time,
        client_name = quote.client_name,
        client_email = quote.client_email,
        client_phone = quote.client_phone,
    )
}

/// WhatsApp text following up on a quick estimate.
pub fn build_estimate_share_message(estimate: &Estimate) -> String {
    format!(
        "Hola! Hice una estimación rápida y me interesa recibir una cotización detallada:

📋 *Detalles del Proyecto:*
• Tipo: {construction_type}
• Uso: {usage_type}
• Área: {area}
• Terminación: {finish_level}
• Ubicación: {location}

💰 *Estimación Rápida:*
• Costo: {estimated_cost}
• Tiempo: {estimated_time}

¿Podrían contactarme para coordinar una reunión y recibir una cotización detallada?",
        construction_type = estimate.construction_type,
        usage_type = estimate.usage_type,
        area = estimate.area,
        finish_level = estimate.finish_level,
        location = estimate.location,
        estimated_cost = estimate.estimated_cost,
        estimated_time = estimate.estimated_time,
    )
}

/// Subject line of the quote email.
pub fn quote_email_subject(quote: &Quote) -> String {
    format!("Cotización de Construcción - {}", quote.client_name)
}

/// HTML body of the quote email.
pub fn build_quote_email_html(quote: &Quote) -> String {
    let rows = [
        ("Tipo de Construcción", &quote.construction_type),
        ("Área Total", &quote.area),
        ("Número de Pisos", &quote.floors),
        ("Nivel de Terminación", &quote.finish_level),
        ("Ubicación", &quote.location),
        ("Tiempo Estimado", &quote.estimated_time),
        ("Inversión Total", &quote.total_cost),
    ]
    .iter()
    .map(|(label, value)| {
        format!(
            "<tr><td class=\"quote-label\">{}:</td><td class=\"quote-value\">{}</td></tr>",
            label,
            escape_html(value)
        )
    })
    .collect::<Vec<_>>()
    .join("\n");

    let breakdown = if quote.breakdown.is_empty() {
        "<p>No hay desglose de costos disponible.</p>".to_string()
    } else {
        let items = quote
            .breakdown
            .iter()
            .map(|item| {
                format!(
                    "<li><strong>{}:</strong> {}</li>",
                    escape_html(&item.category),
                    escape_html(&item.cost)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("<ul>\n{}\n</ul>", items)
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="UTF-8">
<title>Cotización de Construcción</title>
<style>
body {{ font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; line-height: 1.6; color: #333; }}
.container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
.quote-label {{ font-weight: 600; color: #374151; padding: 6px 12px 6px 0; }}
.quote-value {{ color: #1f2937; font-weight: 700; }}
</style>
</head>
<body>
<div class="container">
<h1>Cotización de Construcción Personalizada</h1>
<p>Estimado/a {name}</p>
<p>Gracias por confiar en nosotros para tu proyecto de construcción. Esta es la cotización preparada a partir de los datos que ingresaste.</p>
<h3>Resumen de tu Proyecto</h3>
<table>
{rows}
</table>
<h3>Desglose de Costos</h3>
{breakdown}
<p>Esta cotización es válida por 30 días desde la fecha de emisión.</p>
</div>
</body>
</html>"#,
        name = escape_html(&quote.client_name),
        rows = rows,
        breakdown = breakdown,
    )
}

/// WhatsApp click-to-chat link: `<base>/<digits>?text=<percent-encoded message>`.
///
/// Everything but ASCII digits is dropped from `number`, so `+54 9 261...`
/// and `5492617110120` yield the same link.
pub fn whatsapp_link(base_url: &str, number: &str, message: &str) -> String {
    format!(
        "{}/{}?text={}",
        base_url.trim_end_matches('/'),
        digits_only(number),
        urlencoding::encode(message)
    )
}

/// ASCII digits of `number`, in order.
pub fn digits_only(number: &str) -> String {
    number.chars().filter(char::is_ascii_digit).collect()
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
