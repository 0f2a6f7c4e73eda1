use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AttrMatch {
    Exists { key: String },
    Eq { key: String, value: String },
    Includes { key: String, value: String },
    StartsWith { key: String, value: String },
    EndsWith { key: String, value: String },
    Contains { key: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Pseudo {
    Checked,
    Disabled,
    Enabled,
    FirstChild,
    LastChild,
    Not(Vec<Vec<Compound>>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SimpleSelector {
    pub(crate) tag: Option<String>,
    pub(crate) universal: bool,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attrs: Vec<AttrMatch>,
    pub(crate) pseudos: Vec<Pseudo>,
}

impl SimpleSelector {
    fn is_empty(&self) -> bool {
        self.tag.is_none()
            && !self.universal
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attrs.is_empty()
            && self.pseudos.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Combinator {
    Descendant,
    Child,
    AdjacentSibling,
    GeneralSibling,
}

/// One compound selector plus its relation to the compound on its left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Compound {
    pub(crate) simple: SimpleSelector,
    pub(crate) combinator: Option<Combinator>,
}

/// Parses a comma-separated selector list into match groups.
pub(crate) fn parse_selector_list(selector: &str) -> Result<Vec<Vec<Compound>>> {
    let mut groups = Vec::new();
    for group in split_groups(selector)? {
        groups.push(parse_chain(&group)?);
    }
    Ok(groups)
}

fn split_groups(selector: &str) -> Result<Vec<String>> {
    let selector = selector.trim();
    if selector.is_empty() {
        return Err(Error::UnsupportedSelector(selector.into()));
    }

    let mut groups = Vec::new();
    let mut current = String::new();
    let mut brackets = 0usize;
    let mut parens = 0usize;

    for ch in selector.chars() {
        match ch {
            '[' => brackets += 1,
            ']' => {
                brackets = brackets
                    .checked_sub(1)
                    .ok_or_else(|| Error::UnsupportedSelector(selector.into()))?;
            }
            '(' => parens += 1,
            ')' => {
                parens = parens
                    .checked_sub(1)
                    .ok_or_else(|| Error::UnsupportedSelector(selector.into()))?;
            }
            ',' if brackets == 0 && parens == 0 => {
                if current.trim().is_empty() {
                    return Err(Error::UnsupportedSelector(selector.into()));
                }
                groups.push(current.trim().to_string());
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(ch);
    }

    if brackets != 0 || parens != 0 || current.trim().is_empty() {
        return Err(Error::UnsupportedSelector(selector.into()));
    }
    groups.push(current.trim().to_string());
    Ok(groups)
}

fn parse_chain(group: &str) -> Result<Vec<Compound>> {
    let mut chain = Vec::new();
    let mut pending: Option<Combinator> = None;

    for token in tokenize(group)? {
        let explicit = match token.as_str() {
            ">" => Some(Combinator::Child),
            "+" => Some(Combinator::AdjacentSibling),
            "~" => Some(Combinator::GeneralSibling),
            _ => None,
        };
        if let Some(combinator) = explicit {
            if pending.is_some() || chain.is_empty() {
                return Err(Error::UnsupportedSelector(group.into()));
            }
            pending = Some(combinator);
            continue;
        }

        let simple = parse_simple(&token)?;
        let combinator = if chain.is_empty() {
            None
        } else {
            Some(pending.take().unwrap_or(Combinator::Descendant))
        };
        chain.push(Compound { simple, combinator });
    }

    if chain.is_empty() || pending.is_some() {
        return Err(Error::UnsupportedSelector(group.into()));
    }
    Ok(chain)
}

fn tokenize(group: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut brackets = 0usize;
    let mut parens = 0usize;

    let flush = |current: &mut String, tokens: &mut Vec<String>| {
        if !current.trim().is_empty() {
            tokens.push(current.trim().to_string());
        }
        current.clear();
    };

    for ch in group.chars() {
        match ch {
            '[' => brackets += 1,
            ']' => {
                brackets = brackets
                    .checked_sub(1)
                    .ok_or_else(|| Error::UnsupportedSelector(group.into()))?;
            }
            '(' => parens += 1,
            ')' => {
                parens = parens
                    .checked_sub(1)
                    .ok_or_else(|| Error::UnsupportedSelector(group.into()))?;
            }
            '>' | '+' | '~' if brackets == 0 && parens == 0 => {
                flush(&mut current, &mut tokens);
                tokens.push(ch.to_string());
                continue;
            }
            _ if ch.is_ascii_whitespace() && brackets == 0 && parens == 0 => {
                flush(&mut current, &mut tokens);
                continue;
            }
            _ => {}
        }
        current.push(ch);
    }

    if brackets != 0 || parens != 0 {
        return Err(Error::UnsupportedSelector(group.into()));
    }
    flush(&mut current, &mut tokens);
    Ok(tokens)
}

fn parse_simple(part: &str) -> Result<SimpleSelector> {
    let bytes = part.as_bytes();
    let mut i = 0usize;
    let mut simple = SimpleSelector::default();

    while i < bytes.len() {
        match bytes[i] {
            b'*' => {
                if simple.universal || simple.tag.is_some() {
                    return Err(Error::UnsupportedSelector(part.into()));
                }
                simple.universal = true;
                i += 1;
            }
            b'#' => {
                let (id, next) = parse_ident(part, i + 1)
                    .ok_or_else(|| Error::UnsupportedSelector(part.into()))?;
                if simple.id.replace(id).is_some() {
                    return Err(Error::UnsupportedSelector(part.into()));
                }
                i = next;
            }
            b'.' => {
                let (class_name, next) = parse_ident(part, i + 1)
                    .ok_or_else(|| Error::UnsupportedSelector(part.into()))?;
                simple.classes.push(class_name);
                i = next;
            }
            b'[' => {
                let (attr, next) = parse_attr(part, i)?;
                simple.attrs.push(attr);
                i = next;
            }
            b':' => {
                let (pseudo, next) = parse_pseudo(part, i + 1)?;
                simple.pseudos.push(pseudo);
                i = next;
            }
            _ => {
                if !simple.is_empty() {
                    return Err(Error::UnsupportedSelector(part.into()));
                }
                let (tag, next) = parse_ident(part, i)
                    .ok_or_else(|| Error::UnsupportedSelector(part.into()))?;
                simple.tag = Some(tag.to_ascii_lowercase());
                i = next;
            }
        }
    }

    if simple.is_empty() {
        return Err(Error::UnsupportedSelector(part.into()));
    }
    Ok(simple)
}

fn parse_pseudo(part: &str, start: usize) -> Result<(Pseudo, usize)> {
    let (name, next) =
        parse_ident(part, start).ok_or_else(|| Error::UnsupportedSelector(part.into()))?;

    if part.as_bytes().get(next) == Some(&b'(') {
        if name != "not" {
            return Err(Error::UnsupportedSelector(part.into()));
        }
        let close = find_matching_paren(&part[next + 1..])
            .ok_or_else(|| Error::UnsupportedSelector(part.into()))?;
        let body = &part[next + 1..next + 1 + close];
        let inner = parse_selector_list(body)?;
        return Ok((Pseudo::Not(inner), next + close + 2));
    }

    let pseudo = match name.as_str() {
        "checked" => Pseudo::Checked,
        "disabled" => Pseudo::Disabled,
        "enabled" => Pseudo::Enabled,
        "first-child" => Pseudo::FirstChild,
        "last-child" => Pseudo::LastChild,
        _ => return Err(Error::UnsupportedSelector(part.into())),
    };
    Ok((pseudo, next))
}

fn find_matching_paren(body: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (idx, b) in body.bytes().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

fn parse_attr(part: &str, open_bracket: usize) -> Result<(AttrMatch, usize)> {
    let bytes = part.as_bytes();
    let mut i = open_bracket + 1;
    skip_ws(bytes, &mut i);

    let key_start = i;
    while i < bytes.len() && is_attr_name_char(bytes[i]) {
        i += 1;
    }
    if key_start == i {
        return Err(Error::UnsupportedSelector(part.into()));
    }
    let key = part[key_start..i].to_ascii_lowercase();

    skip_ws(bytes, &mut i);
    match bytes.get(i) {
        Some(b']') => return Ok((AttrMatch::Exists { key }, i + 1)),
        Some(_) => {}
        None => return Err(Error::UnsupportedSelector(part.into())),
    }

    let op = match (bytes[i], bytes.get(i + 1)) {
        (b'=', _) => {
            i += 1;
            b'='
        }
        (b'~' | b'^' | b'$' | b'*', Some(&b'=')) => {
            let op = bytes[i];
            i += 2;
            op
        }
        _ => return Err(Error::UnsupportedSelector(part.into())),
    };

    skip_ws(bytes, &mut i);
    let (value, mut next) = parse_attr_value(part, i)?;
    skip_ws(bytes, &mut next);
    if bytes.get(next) != Some(&b']') {
        return Err(Error::UnsupportedSelector(part.into()));
    }

    let cond = match op {
        b'=' => AttrMatch::Eq { key, value },
        b'~' => AttrMatch::Includes { key, value },
        b'^' => AttrMatch::StartsWith { key, value },
        b'$' => AttrMatch::EndsWith { key, value },
        b'*' => AttrMatch::Contains { key, value },
        _ => unreachable!(),
    };
    Ok((cond, next + 1))
}

fn parse_attr_value(part: &str, start: usize) -> Result<(String, usize)> {
    let bytes = part.as_bytes();
    match bytes.get(start) {
        Some(&quote) if quote == b'"' || quote == b'\'' => {
            let mut i = start + 1;
            while i < bytes.len() && bytes[i] != quote {
                i += 1;
            }
            if i >= bytes.len() {
                return Err(Error::UnsupportedSelector(part.into()));
            }
            Ok((part[start + 1..i].to_string(), i + 1))
        }
        Some(_) => {
            let mut i = start;
            while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b']' {
                i += 1;
            }
            Ok((part[start..i].to_string(), i))
        }
        None => Err(Error::UnsupportedSelector(part.into())),
    }
}

fn parse_ident(src: &str, start: usize) -> Option<(String, usize)> {
    let bytes = src.as_bytes();
    if start >= bytes.len() || !is_ident_char(bytes[start]) {
        return None;
    }
    let mut end = start + 1;
    while end < bytes.len() && is_ident_char(bytes[end]) {
        end += 1;
    }
    Some((src[start..end].to_string(), end))
}

fn skip_ws(bytes: &[u8], i: &mut usize) {
    while *i < bytes.len() && bytes[*i].is_ascii_whitespace() {
        *i += 1;
    }
}

fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

fn is_attr_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b':'
}
