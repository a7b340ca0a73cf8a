use super::*;

fn texts(units: &[TextUnit]) -> Vec<&str> {
    units.iter().map(|u| u.text.as_str()).collect()
}

#[test]
fn letters_keep_whitespace_as_static_units() {
    let units = split_units("HI yo", Granularity::Letter);
    assert_eq!(texts(&units), ["H", "I", " ", "y", "o"]);
    assert!(!units[2].animated);
    let slots: Vec<usize> = units.iter().filter(|u| u.animated).map(|u| u.slot).collect();
    assert_eq!(slots, [0, 1, 2, 3]);
    assert_eq!(group_sizes(&units), [4]);
}

#[test]
fn words_preserve_whitespace_runs() {
    let units = split_units("alpha  beta", Granularity::Word);
    assert_eq!(texts(&units), ["alpha", "  ", "beta"]);
    assert_eq!(units[2].word, Some(1));
    assert_eq!(units[2].slot, 1);
}

#[test]
fn letters_in_words_are_grouped_per_word() {
    let units = split_units("ab cde", Granularity::LetterInWord);
    let animated: Vec<(usize, usize)> = units
        .iter()
        .filter(|u| u.animated)
        .map(|u| (u.group, u.slot))
        .collect();
    assert_eq!(animated, [(0, 0), (0, 1), (1, 0), (1, 1), (1, 2)]);
    assert_eq!(group_sizes(&units), [2, 3]);
}

#[test]
fn block_and_empty_inputs() {
    assert_eq!(texts(&split_units("one two", Granularity::Block)), ["one two"]);
    assert!(split_units("", Granularity::Letter).is_empty());
    let leading = split_units(" a", Granularity::Letter);
    assert_eq!(texts(&leading), [" ", "a"]);
}
