use super::types::{Contact, PhoneNumber};

const INDENT: &str = "    ";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// Accumulates rendered `<contact>` elements and wraps them in the
/// `<phonebooks><phonebook>` envelope the router's importer expects.
pub struct Phonebook {
    mod_time: u64,
    body: String,
    len: usize,
}

impl Phonebook {
    /// `mod_time` (Unix seconds) is stamped on every contact of the phonebook.
    pub fn new(mod_time: u64) -> Self {
        Self {
            mod_time,
            body: String::new(),
            len: 0,
        }
    }

    pub fn push(&mut self, contact: &Contact) {
        render_contact(&mut self.body, contact, self.mod_time, 2);
        self.len += 1;
    }

    pub fn contact_count(&self) -> usize {
        self.len
    }

    pub fn finish(self) -> String {
        let mut out = String::with_capacity(self.body.len() + 128);
        line(&mut out, 0, XML_DECLARATION);
        line(&mut out, 0, "<phonebooks>");
        line(&mut out, 1, "<phonebook>");
        out.push_str(&self.body);
        line(&mut out, 1, "</phonebook>");
        line(&mut out, 0, "</phonebooks>");
        out
    }
}

pub fn render_contact(out: &mut String, contact: &Contact, mod_time: u64, depth: usize) {
    line(out, depth, "<contact>");
    line(out, depth + 1, "<category>0</category>");
    line(out, depth + 1, "<person>");
    line(
        out,
        depth + 2,
        &format!("<realName>{}</realName>", escape_text(&contact.name)),
    );
    line(out, depth + 1, "</person>");
    render_telephony(out, &contact.numbers, depth + 1);
    line(out, depth + 1, "<services />");
    line(out, depth + 1, "<setup />");
    line(out, depth + 1, r#"<features doorphone="0" />"#);
    line(out, depth + 1, &format!("<mod_time>{}</mod_time>", mod_time));
    line(
        out,
        depth + 1,
        &format!("<uniqueid>{}</uniqueid>", escape_text(&contact.id)),
    );
    line(out, depth, "</contact>");
}

pub fn render_telephony(out: &mut String, numbers: &[PhoneNumber], depth: usize) {
    line(out, depth, &format!(r#"<telephony nid="{}">"#, numbers.len()));
    for number in numbers {
        line(
            out,
            depth + 1,
            &format!(
                r#"<number type="{}" prio="{}" id="{}">{}</number>"#,
                number.type_,
                number.priority(),
                number.sequence_id,
                escape_text(&number.value)
            ),
        );
    }
    line(out, depth, "</telephony>");
}

fn line(out: &mut String, depth: usize, text: &str) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(text);
    out.push('\n');
}

/// Escapes the characters that would otherwise end or corrupt XML text content.
fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
