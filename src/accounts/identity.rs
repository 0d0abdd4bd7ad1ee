use rocket::http::Status;
use rocket::request::{FromRequest, Outcome, Request};
use tracing::warn;

use crate::data::DBConnection;

use super::data::OwnerID;
use super::helpers::ensure_profile;

/// Header asserted by the fronting proxy after authentication. The guard is
/// the only place this decodes, so swapping in real token verification
/// touches one file.
pub const IDENTITY_HEADER: &str = "x-momentum-identity";

/// The authenticated owner identity of the current request. Guarding on this
/// type also materializes the identity's profile row on first contact.
pub struct Identity(pub OwnerID);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Identity {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let owner = match request.headers().get_one(IDENTITY_HEADER) {
            Some(value) if !value.trim().is_empty() => value.trim().to_string(),
            _ => return Outcome::Error((Status::Unauthorized, ())),
        };

        let db_connection = match request.rocket().state::<DBConnection>() {
            Some(db_connection) => db_connection,
            None => return Outcome::Error((Status::InternalServerError, ())),
        };

        let ensured = db_connection
            .lock()
            .map_err(|e| e.to_string())
            .and_then(|db_connection| {
                ensure_profile(&owner, &db_connection).map_err(|e| e.to_string())
            });

        match ensured {
            Ok(()) => Outcome::Success(Identity(owner)),
            Err(e) => {
                warn!("could not materialize profile for request identity: {}", e);
                Outcome::Error((Status::InternalServerError, ()))
            }
        }
    }
}
