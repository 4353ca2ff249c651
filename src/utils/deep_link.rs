/// Extract the search query from a deep link such as `https://api.example/?q=fetch`.
///
/// `+` decodes to a space and `%XX` escapes are decoded as UTF-8. Returns
/// `None` when the link carries no non-empty `q` parameter.
pub fn query_from_link(link: &str) -> Option<String> {
    let (_, query_string) = link.split_once('?')?;
    let query_string = query_string.split('#').next().unwrap_or_default();

    query_string
        .split('&')
        .find_map(|pair| pair.strip_prefix("q="))
        .map(decode_component)
        .filter(|query| !query.is_empty())
}

fn decode_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'+' => decoded.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        decoded.push(hi << 4 | lo);
                        i += 2;
                    }
                    _ => decoded.push(b'%'),
                }
            }
            byte => decoded.push(byte),
        }
        i += 1;
    }

    String::from_utf8_lossy(&decoded).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|d| d as u8)
}
