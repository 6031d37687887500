use crate::err::Error;

pub const DEFAULT_WORK_FACTOR: u32 = 10;

/// Applies a salted bcrypt hash to the incoming plaintext credential. A single
/// hash at the default work factor takes tens of milliseconds of pure CPU, so
/// it runs on the blocking pool and never holds a database connection.
#[derive(Debug, Clone, Copy)]
pub struct CredentialHasher {
    cost: u32,
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self {
            cost: DEFAULT_WORK_FACTOR,
        }
    }
}

impl CredentialHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub async fn hash(&self, plaintext: &str) -> Result<String, Error> {
        let cost = self.cost;
        let plaintext = plaintext.to_owned();
        match tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, cost)).await {
            Ok(Ok(hash)) => Ok(hash),
            Ok(Err(err)) => {
                log::error!("bcrypt failure: {}", err);
                Err(hashing_failure())
            }
            Err(err) => {
                log::error!("Hashing task failed to complete: {}", err);
                Err(hashing_failure())
            }
        }
    }
}

fn hashing_failure() -> Error {
    Error::HashingFailure {
        message: "Could not process the credential".to_string(),
    }
}
