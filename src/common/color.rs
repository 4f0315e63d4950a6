/// Fallback for buckets with no visible members to average over.
const NEUTRAL: &str = "#aaaaaa";

/// Parse a `#rrggbb` hex color into channels. Shorthand and named colors
/// are not accepted; aggregation inputs are always expanded hex.
pub(crate) fn parse_hex(color: &str) -> Option<[u8; 3]> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r, g, b])
}

fn to_hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

/// Count-weighted RGB average over `(color, count)` pairs, as used for a
/// deme's single display color. Unparsable colors and zero counts are
/// ignored; an empty input yields a neutral grey.
pub fn average_colors<'a, I>(counts: I) -> String
where
    I: IntoIterator<Item = (&'a str, usize)>,
{
    let mut sum = [0u64; 3];
    let mut total = 0u64;
    for (color, count) in counts {
        let Some(rgb) = parse_hex(color) else { continue };
        for (acc, channel) in sum.iter_mut().zip(rgb) {
            *acc += channel as u64 * count as u64;
        }
        total += count as u64;
    }
    if total == 0 {
        return NEUTRAL.to_string();
    }
    to_hex([
        (sum[0] / total) as u8,
        (sum[1] / total) as u8,
        (sum[2] / total) as u8,
    ])
}
