//! Server-rendered HTML pages.
//!
//! Every piece of record text goes through [`escape`] before it reaches the page.

use mongocrud::record::Record;

/// Escapes text for use in HTML element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }

    escaped
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n{body}</body>\n</html>\n",
        title = escape(title),
    )
}

/// The record listing, one table row per record.
pub fn index(records: &[Record]) -> String {
    let mut body = String::from("<h1>Clients</h1>\n<p><a href=\"/create\">Add client</a></p>\n");

    body.push_str("<table>\n<tr><th>Name</th><th>Email</th><th>Age</th><th></th></tr>\n");
    for record in records {
        let id = record.id.map(|id| id.to_hex()).unwrap_or_default();

        body.push_str(&format!(
            "<tr><td>{name}</td><td>{email}</td><td>{age}</td>\
             <td><a href=\"/edit/{id}\">Edit</a> \
             <form method=\"post\" action=\"/delete/{id}\" style=\"display:inline\">\
             <button type=\"submit\">Delete</button></form></td></tr>\n",
            name = escape(&record.name),
            email = escape(&record.email),
            age = escape(&record.age),
        ));
    }
    body.push_str("</table>\n");

    page("Clients", &body)
}

fn record_form(action: &str, submit: &str, record: Option<&Record>) -> String {
    let value = |text: Option<&str>| escape(text.unwrap_or_default());

    format!(
        "<form method=\"post\" action=\"{action}\">\n\
         <label>Name <input type=\"text\" name=\"name\" value=\"{name}\"></label>\n\
         <label>Email <input type=\"text\" name=\"email\" value=\"{email}\"></label>\n\
         <label>Age <input type=\"text\" name=\"age\" value=\"{age}\"></label>\n\
         <button type=\"submit\">{submit}</button>\n\
         </form>\n\
         <p><a href=\"/\">Back</a></p>\n",
        action = escape(action),
        name = value(record.map(|r| r.name.as_str())),
        email = value(record.map(|r| r.email.as_str())),
        age = value(record.map(|r| r.age.as_str())),
    )
}

/// The empty create form.
pub fn create() -> String {
    page("Add client", &format!("<h1>Add client</h1>\n{}", record_form("/create", "Create", None)))
}

/// The edit form, pre-filled with the record's current values.
pub fn edit(record: &Record) -> String {
    let action = format!("/edit/{}", record.id.map(|id| id.to_hex()).unwrap_or_default());

    page("Edit client", &format!("<h1>Edit client</h1>\n{}", record_form(&action, "Save", Some(record))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_and_quotes() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;",
        );
    }

    #[test]
    fn index_escapes_record_text() {
        let html = index(&[Record::new("<script>alert(1)</script>", "a@example.com", "38")]);

        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn edit_form_is_prefilled() {
        let html = edit(&Record::new("John", "test@example.com", "38"));

        assert!(html.contains(r#"name="name" value="John""#));
        assert!(html.contains(r#"name="age" value="38""#));
    }
}
