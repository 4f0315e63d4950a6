/// Options for [`pretty_string`]. The defaults title-case words and leave
/// everything else alone.
#[derive(Debug, Clone, Copy)]
pub struct PrettyOptions {
    /// Truncate to this many characters (with a trailing "...") when non-zero.
    pub trim: usize,
    /// Uppercase the first letter of every word.
    pub camel_case: bool,
    /// Strip commas from the result.
    pub remove_comma: bool,
    /// Strip "et al." / "et al" suffixes (any capitalisation emitted by us).
    pub strip_et_al: bool,
}

impl Default for PrettyOptions {
    fn default() -> Self {
        Self { trim: 0, camel_case: true, remove_comma: false, strip_et_al: false }
    }
}

/// Human-friendly rendering of raw annotation strings: underscores become
/// spaces, words are title-cased, and a few well-known abbreviations
/// (USVI, USA, UK) are fully uppercased.
pub fn pretty_string(raw: &str, opts: PrettyOptions) -> String {
    let mut x: String = if opts.trim > 0 && raw.chars().count() > opts.trim {
        let mut s: String = raw.chars().take(opts.trim).collect();
        s.push_str("...");
        s
    } else {
        raw.to_string()
    };

    if matches!(x.to_lowercase().as_str(), "usvi" | "usa" | "uk") {
        return x.to_uppercase();
    }

    x = x.replace('_', " ");

    if opts.camel_case {
        x = x
            .split(' ')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
    }

    if opts.remove_comma {
        x = x.replace(',', "");
    }

    if opts.strip_et_al {
        for pattern in ["et al.", "Et Al.", "et al", "Et Al"] {
            x = x.replace(pattern, "");
        }
    }

    x
}

/// Fixed-point rendering of a number with roughly five significant digits,
/// never in scientific notation. `multiplier` appends a multiplication sign
/// for axis-label style output.
pub fn pretty_number(value: f64, multiplier: bool) -> String {
    let magnitude = (value.abs() + 1e-10).log10().ceil() as i64;
    let decimals = (5 - magnitude).clamp(0, 15) as usize;
    let mut out = format!("{value:.decimals$}");
    if multiplier {
        out.push('\u{00d7}');
    }
    out
}
