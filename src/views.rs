//! HTML pages rendered after a purchase.

use axum::response::Html;

use crate::fulfillment::Fulfillment;
use crate::models::Platform;

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        body
    ))
}

pub fn render_success(fulfillment: &Fulfillment) -> Html<String> {
    let license = &fulfillment.license;
    let mut body = String::new();

    body.push_str("<h1>Thanks for your purchase!</h1>\n");
    body.push_str(&format!(
        "<p>Your license key:</p>\n<pre class=\"license-key\">{}</pre>\n",
        escape_html(&license.key)
    ));
    if let Some(expiry) = &license.expiry {
        body.push_str(&format!(
            "<p>Valid until {}</p>\n",
            escape_html(expiry)
        ));
    }

    if fulfillment.platform == Platform::Unknown {
        body.push_str("<p>We couldn't detect your operating system. The link below may not match your platform.</p>\n");
    }
    body.push_str(&format!(
        "<p><a class=\"download-link\" href=\"{}\">Download</a></p>\n",
        escape_html(&fulfillment.download_link)
    ));

    if let Some(email) = fulfillment.sale.field("email") {
        body.push_str(&format!(
            "<p>A receipt was sent to {}.</p>\n",
            escape_html(email)
        ));
    }

    let sale = serde_json::to_string_pretty(&fulfillment.sale).unwrap_or_default();
    body.push_str(&format!(
        "<details>\n<summary>Order details</summary>\n<pre class=\"sale\">{}</pre>\n</details>",
        escape_html(&sale)
    ));

    page("Purchase complete", &body)
}

pub fn render_error(message: &str) -> Html<String> {
    page(
        "Something went wrong",
        &format!(
            "<h1>Something went wrong</h1>\n<p class=\"error\">{}</p>",
            escape_html(message)
        ),
    )
}
