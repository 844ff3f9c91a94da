/// Generate a unique ID for a note
///
/// Returns a 32-character URL-friendly string, the same length as the
/// nonce ids already found in existing note documents.
pub fn generate_id() -> String {
    nanoid::nanoid!(32)
}
