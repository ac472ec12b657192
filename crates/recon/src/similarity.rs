//! Jaro and Jaro-Winkler similarity over normalized vendor names.

/// Jaro similarity in `[0, 1]`.
///
/// Identical strings (including both empty) score 1.0; a single empty side
/// scores 0.0. Matching uses the standard window of
/// `max(len_a, len_b) / 2 - 1`; unequal strings of length <= 1 have a
/// negative window and score 0.0.
pub fn jaro(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let ca: Vec<char> = a.chars().collect();
    let cb: Vec<char> = b.chars().collect();
    let (len_a, len_b) = (ca.len(), cb.len());

    let max_len = len_a.max(len_b);
    if max_len < 2 {
        // Window would be negative: two unequal one-char strings.
        return 0.0;
    }
    let window = max_len / 2 - 1;

    let mut a_matched = vec![false; len_a];
    let mut b_matched = vec![false; len_b];
    let mut matches = 0usize;

    // Greedy forward scan: each char of `a` claims the first unused
    // matching char of `b` inside the window, irrevocably.
    for i in 0..len_a {
        let start = i.saturating_sub(window);
        let end = (i + window + 1).min(len_b);
        for j in start..end {
            if b_matched[j] || ca[i] != cb[j] {
                continue;
            }
            a_matched[i] = true;
            b_matched[j] = true;
            matches += 1;
            break;
        }
    }

    if matches == 0 {
        return 0.0;
    }

    // Transpositions: position-wise mismatches among matched pairs, halved.
    let mut transpositions = 0usize;
    let mut k = 0usize;
    for i in 0..len_a {
        if !a_matched[i] {
            continue;
        }
        while !b_matched[k] {
            k += 1;
        }
        if ca[i] != cb[k] {
            transpositions += 1;
        }
        k += 1;
    }

    let m = matches as f64;
    let t = transpositions as f64 / 2.0;
    (m / len_a as f64 + m / len_b as f64 + (m - t) / m) / 3.0
}

/// Jaro-Winkler similarity: Jaro boosted for a shared leading prefix of up
/// to 4 characters. Always >= [`jaro`], equal when there is no common prefix.
pub fn jaro_winkler(a: &str, b: &str) -> f64 {
    let j = jaro(a, b);
    let prefix = a
        .chars()
        .zip(b.chars())
        .take(4)
        .take_while(|(x, y)| x == y)
        .count();
    j + prefix as f64 * 0.1 * (1.0 - j)
}
