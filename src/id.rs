use uuid::Uuid;

/// Produces storage keys for uploaded objects.
///
/// Keys must be safe to use verbatim as object keys. Collisions are not checked.
pub trait IdGenerator: Send + Sync {
    fn new_id(&self) -> String;
}

/// Random (version 4) UUIDs in their hyphenated form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn new_id(&self) -> String {
        Uuid::new_v4().hyphenated().to_string()
    }
}

impl<F> IdGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn new_id(&self) -> String {
        self()
    }
}
