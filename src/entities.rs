/*
** This file is a part of Tinder (XMPP stanza object model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Tinder is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

pub mod predefined {
    pub const LT: &str = "&lt;";
    pub const GT: &str = "&gt;";
    pub const AMP: &str = "&amp;";
    pub const APOS: &str = "&apos;";
    pub const QUOT: &str = "&quot;";
}

fn replacement(c: char) -> Option<&'static str> {
    match c {
        '<' => Some(predefined::LT),
        '>' => Some(predefined::GT),
        '&' => Some(predefined::AMP),
        '\'' => Some(predefined::APOS),
        '"' => Some(predefined::QUOT),
        _ => None,
    }
}

pub fn escaped_size(s: &str) -> usize {
    s.chars()
        .map(|c| match replacement(c) {
            Some(entity) => entity.len(),
            None => c.len_utf8(),
        })
        .sum()
}

pub fn escape(s: &str, buf: &mut String) {
    let mut start = 0;
    for (pos, c) in s.char_indices() {
        if let Some(entity) = replacement(c) {
            buf.push_str(&s[start..pos]);
            buf.push_str(entity);
            start = pos + c.len_utf8();
        }
    }
    buf.push_str(&s[start..]);
}

pub fn escape_fmt(s: &str, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let mut start = 0;
    for (pos, c) in s.char_indices() {
        if let Some(entity) = replacement(c) {
            f.write_str(&s[start..pos])?;
            f.write_str(entity)?;
            start = pos + c.len_utf8();
        }
    }
    f.write_str(&s[start..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_size() {
        const NOESCAPE: &str = "abc$#@!%^*(){}[]=-+/.,;:FDSF3443";
        assert_eq!(escaped_size(NOESCAPE), NOESCAPE.len());
        assert_eq!(escaped_size("abc&def"), "abc&amp;def".len());
        assert_eq!(escaped_size("<>&'\""), "&lt;&gt;&amp;&apos;&quot;".len());
        assert_eq!(escaped_size("çay<"), "çay&lt;".len());
    }

    #[test]
    fn escaping() {
        let mut buf = String::new();
        escape("a<b>&'\"ğ", &mut buf);
        assert_eq!(buf, "a&lt;b&gt;&amp;&apos;&quot;ğ");
        assert_eq!(buf.len(), escaped_size("a<b>&'\"ğ"));

        let mut buf = String::new();
        escape("plain", &mut buf);
        assert_eq!(buf, "plain");
    }
}
