/// Decide whether a (text, audio) pair needs its narration regenerated.
///
/// `previous` is the text value read back from the store before the save
/// committed (`None` for a newly created record, or when the pre-save
/// lookup failed). Regeneration is needed when the record is new, the text
/// changed, or no audio artifact currently exists.
///
/// Blank text never triggers synthesis: a segment without error text makes
/// no call for its error-audio pair.
pub fn should_regenerate(previous: Option<&str>, current: &str, has_audio: bool) -> bool {
    if current.trim().is_empty() {
        return false;
    }
    previous != Some(current) || !has_audio
}
