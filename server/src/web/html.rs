use axum::response::Html;

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

pub fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    ))
}

pub fn errors(messages: &[String]) -> String {
    if messages.is_empty() {
        return String::new();
    }
    let items = messages
        .iter()
        .map(|m| format!("<li>{}</li>", escape(m)))
        .collect::<String>();
    format!("<ul class=\"errors\">{}</ul>", items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape("<b>\"AC/DC\" & 'co'</b>"),
            "&lt;b&gt;&quot;AC/DC&quot; &amp; &#x27;co&#x27;&lt;/b&gt;"
        );
    }

    #[test]
    fn no_messages_render_nothing() {
        assert_eq!(errors(&[]), "");
    }
}
