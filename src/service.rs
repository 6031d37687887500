use crate::credential::CredentialHasher;
use crate::err::Error;
use crate::models::{NewStudent, RegistrationInput, StudentSummary};
use crate::repo::StudentStore;
use crate::validate::{is_valid_email, validate_id, validate_registration, validate_username};

/// Orchestrates validation, credential hashing and the single insert.
pub struct RegistrationService<S> {
    store: S,
    hasher: CredentialHasher,
}

impl<S: StudentStore> RegistrationService<S> {
    pub fn new(store: S, hasher: CredentialHasher) -> Self {
        Self { store, hasher }
    }

    /// Validation and hashing perform no I/O; the insert is the single write.
    /// A request abandoned at any point leaves no partial state behind, and
    /// duplicate races are settled solely by the storage unique constraints.
    pub async fn register(&self, input: RegistrationInput) -> Result<i64, Error> {
        let problems = validate_registration(&input);
        if !problems.is_empty() {
            return Err(Error::ValidationFailed {
                message: problems.join("; "),
            });
        }

        let email = input.email.unwrap_or_default();
        if !is_valid_email(&email) {
            return Err(Error::InvalidEmailFormat {
                message: "The email format is invalid".to_string(),
            });
        }

        let plaintext = input.credential_plaintext.unwrap_or_default();
        let credential_hash = self.hasher.hash(&plaintext).await?;

        let student = NewStudent {
            full_name: input.full_name.unwrap_or_default().trim().to_string(),
            access_username: input.access_username.unwrap_or_default().trim().to_string(),
            credential_hash,
            email: email.trim().to_string(),
            note: input
                .note
                .as_deref()
                .map(str::trim)
                .filter(|note| !note.is_empty())
                .map(str::to_string),
        };

        let id = self.store.insert(student).await?;
        Ok(id)
    }
}

/// Validates raw lookup input and queries the store.
pub struct LookupService<S> {
    store: S,
}

impl<S: StudentStore> LookupService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn list_all(&self) -> Result<Vec<StudentSummary>, Error> {
        Ok(self.store.list_all().await?)
    }

    pub async fn get_by_id(&self, raw_id: &str) -> Result<StudentSummary, Error> {
        let id = match validate_id(raw_id) {
            Some(id) => id,
            None => {
                return Err(Error::InvalidId {
                    message: format!("The id `{}` must be a whole number", raw_id),
                })
            }
        };
        match self.store.get_by_id(id).await? {
            Some(student) => Ok(student),
            None => Err(Error::NotFound {
                message: format!("No student found with id {}", id),
            }),
        }
    }

    pub async fn get_by_username(&self, raw_username: &str) -> Result<StudentSummary, Error> {
        let username = match validate_username(raw_username) {
            Some(username) => username,
            None => {
                return Err(Error::InvalidUsername {
                    message: "The username cannot be blank".to_string(),
                })
            }
        };
        match self.store.get_by_username(&username).await? {
            Some(student) => Ok(student),
            None => Err(Error::NotFound {
                message: format!("No student found with username `{}`", username),
            }),
        }
    }
}
