/// Extract the target name of a same-document `$ref`.
///
/// `#/components/schemas/Pet` and `#/definitions/Pet` both yield `Pet`. JSON
/// pointer escapes (`~1`, `~0`) are decoded. Returns `None` for external or
/// remote references and for pointers without a final segment.
pub fn local_ref_name(ref_path: &str) -> Option<String> {
    let pointer = ref_path.strip_prefix("#/")?;
    let last = pointer.rsplit('/').next()?;
    if last.is_empty() {
        return None;
    }
    Some(last.replace("~1", "/").replace("~0", "~"))
}
