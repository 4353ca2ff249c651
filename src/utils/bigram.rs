use ahash::AHashSet;
use regex::Regex;
use std::sync::LazyLock;

/// A bigram is a 2-character window stored as its UTF-8 text
pub type Bigram = String;

/// Synthetic bigram appended to every container (module/class) name.
pub const MODULE_MARKER: &str = " :";

/// Uppercase letter followed by a lowercase run, collapsed to the capital.
static CAPITALIZED_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z])[a-z]+").expect("static pattern"));

/// Derive the distinct bigram set of a fully qualified entry name.
///
/// `member_name` is the bare member name (no sigil, no params) when the
/// entry is a method or attribute, `None` for containers.
///
/// The output keeps first-seen order so that corpus-wide tallies have a
/// deterministic tie-break.
///
/// ```
/// use docsift::utils::derive_bigrams;
///
/// let bigrams = derive_bigrams("Foo::Bar#baz", Some("baz"));
/// assert!(bigrams.contains(&"#b".to_string()));
/// assert!(bigrams.contains(&".b".to_string()));
/// assert!(bigrams.contains(&"z(".to_string()));
/// ```
pub fn derive_bigrams(name: &str, member_name: Option<&str>) -> Vec<Bigram> {
    // "Net::HTTP#get" splits into ":Net", ":HTTP", "#get"
    let mut strings = split_segments(name);

    // initialisms: ":FileUtils" adds ":FU"
    let initialisms: Vec<String> = strings
        .iter()
        .map(|s| CAPITALIZED_RUN.replace_all(s, "$1").into_owned())
        .collect();
    strings.extend(initialisms);

    let lowered: Vec<String> = strings.iter().map(|s| s.to_lowercase()).collect();
    strings.extend(lowered);

    // "#each_pair" also as "#eachpair"
    let joined: Vec<String> = strings.iter().map(|s| s.replace('_', "")).collect();
    strings.extend(joined);

    // word starts: "#each_pair" adds " each", " pair"
    let words: Vec<String> = strings.iter().flat_map(|s| space_words(s)).collect();
    strings.extend(words);

    match member_name.and_then(|m| m.chars().next()) {
        Some(first) => {
            // member marker: "Net::HTTP#get" adds ".g" and "t("
            strings.push(format!(".{first}"));
            if let Some(last) = name.chars().last() {
                strings.push(format!("{last}("));
            }
        }
        None => strings.push(MODULE_MARKER.to_string()),
    }

    let mut seen = AHashSet::with_capacity(strings.len() * 4);
    let mut bigrams = Vec::new();

    // The bare first character stays reachable through "<space><char>"
    if let Some(first) = name.chars().next() {
        let lead = format!(" {first}");
        seen.insert(lead.clone());
        bigrams.push(lead);
    }

    for string in &strings {
        for bigram in char_windows(string) {
            if seen.insert(bigram.clone()) {
                bigrams.push(bigram);
            }
        }
    }

    bigrams
}

/// Extract the bigrams of a live query in typed order.
///
/// The first bigram is the space-prefixed first character, every following
/// one is the window ending at that character. Duplicates are preserved.
pub fn query_bigrams(query: &str) -> Vec<Bigram> {
    let chars: Vec<char> = query.chars().collect();
    let mut bigrams = Vec::with_capacity(chars.len());

    for (i, &c) in chars.iter().enumerate() {
        let prev = if i == 0 { ' ' } else { chars[i - 1] };
        let mut bigram = String::with_capacity(prev.len_utf8() + c.len_utf8());
        bigram.push(prev);
        bigram.push(c);
        bigrams.push(bigram);
    }

    bigrams
}

/// Split a `:`-prefixed name at module boundaries (`::`) and before `#`.
fn split_segments(name: &str) -> Vec<String> {
    let prefixed: Vec<char> = std::iter::once(':').chain(name.chars()).collect();
    let mut segments = Vec::new();
    let mut current = String::new();

    for (i, &c) in prefixed.iter().enumerate() {
        if c == ':' && prefixed.get(i + 1) == Some(&':') {
            // First colon of "::" is the boundary itself
            flush(&mut segments, &mut current);
            continue;
        }
        if c == '#' {
            flush(&mut segments, &mut current);
        }
        current.push(c);
    }
    flush(&mut segments, &mut current);

    segments
}

/// Replace sigils and underscores with spaces, then split before every space.
fn space_words(s: &str) -> Vec<String> {
    let spaced: String = s
        .chars()
        .map(|c| if matches!(c, ':' | '#' | '_') { ' ' } else { c })
        .collect();

    let mut words = Vec::new();
    let mut current = String::new();
    for c in spaced.chars() {
        if c == ' ' {
            flush(&mut words, &mut current);
        }
        current.push(c);
    }
    flush(&mut words, &mut current);

    words
}

fn flush(out: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        out.push(std::mem::take(current));
    }
}

fn char_windows(s: &str) -> impl Iterator<Item = Bigram> + '_ {
    s.chars().zip(s.chars().skip(1)).map(|(a, b)| {
        let mut bigram = String::with_capacity(a.len_utf8() + b.len_utf8());
        bigram.push(a);
        bigram.push(b);
        bigram
    })
}
