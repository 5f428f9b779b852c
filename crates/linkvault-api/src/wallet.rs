//! Wallet writer: turns a platform auth result into an encrypted wallet row.
//!
//! | platform | username            | unique id                  | hashed value        |
//! |----------|---------------------|----------------------------|---------------------|
//! | gmail    | `profile.data.name` | `profile.data.email`       | the email           |
//! | twitter  | `profile.name`      | `profile.screen_name`      | the screen name     |
//! | telegram | none                | the whole result           | the whole result    |
//!
//! Gmail and Twitter encrypt `result.token`; Telegram encrypts the whole
//! result as its token too. Encrypted values are the JSON serialization of
//! their source, so strings keep their quotes.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info};

use linkvault_crypto::{Field, Security};
use linkvault_db::models::{NewWallet, WalletRow, WalletUpdate};
use linkvault_db::{InsertOutcome, WalletStore};
use linkvault_types::Platform;
use linkvault_types::models::{
    GmailResult, PlatformDescriptor, RevealedWallet, TwitterResult, User, WalletSummary,
};

use crate::error::WalletError;

/// Plaintext columns of a wallet before encryption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletFields {
    pub username: Option<String>,
    pub token: String,
    pub unique_id: String,
    /// Plaintext fed to the lookup hash.
    pub hash_input: String,
}

impl WalletFields {
    pub fn from_result(platform: Platform, result: &Value) -> Result<Self, serde_json::Error> {
        match platform {
            Platform::Gmail => {
                let gmail = GmailResult::deserialize(result)?;
                let data = gmail.profile.data;
                Ok(Self {
                    username: Some(serde_json::to_string(&data.name)?),
                    token: serde_json::to_string(&gmail.token)?,
                    unique_id: serde_json::to_string(&data.email)?,
                    hash_input: data.email,
                })
            }
            Platform::Twitter => {
                let twitter = TwitterResult::deserialize(result)?;
                let profile = twitter.profile;
                Ok(Self {
                    username: Some(serde_json::to_string(&profile.name)?),
                    token: serde_json::to_string(&twitter.token)?,
                    unique_id: serde_json::to_string(&profile.screen_name)?,
                    hash_input: profile.screen_name,
                })
            }
            // No stable identifier field exists for telegram payloads, so the
            // whole result is the identifier.
            Platform::Telegram => {
                let raw = serde_json::to_string(result)?;
                Ok(Self {
                    username: None,
                    token: raw.clone(),
                    unique_id: raw.clone(),
                    hash_input: raw,
                })
            }
        }
    }
}

/// Stores and reads wallets. Holds the process key; shares the store.
pub struct WalletWriter<S> {
    store: Arc<S>,
    security: Security,
}

impl<S: WalletStore> WalletWriter<S> {
    pub fn new(store: Arc<S>, security: Security) -> Self {
        Self { store, security }
    }

    #[cfg(test)]
    pub(crate) fn security(&self) -> &Security {
        &self.security
    }

    /// Link `user` to a platform identity.
    ///
    /// Unknown platforms fail with `NotFound` before anything is encrypted.
    /// An identity already linked on that platform, to any user, fails with
    /// `Conflict`. Single attempt, no retries.
    pub async fn store_wallet(
        &self,
        user: &User,
        platform: &PlatformDescriptor,
        result: &Value,
    ) -> Result<WalletSummary, WalletError> {
        let Some(kind) = Platform::from_name(&platform.name) else {
            error!("Platform not found: {}", platform.name);
            return Err(WalletError::NotFound);
        };

        debug!("Storing {} wallet for {} ...", kind, user.id);

        let fields = WalletFields::from_result(kind, result).map_err(|e| {
            error!("Malformed {} auth result: {}", kind, e);
            WalletError::internal(e)
        })?;

        let wallet = self.seal(user, platform, &fields).map_err(|e| {
            error!("Error encrypting {} wallet: {}", kind, e);
            e
        })?;

        let store = Arc::clone(&self.store);
        let outcome = tokio::task::spawn_blocking(move || store.create(&wallet))
            .await
            .map_err(WalletError::internal)?;

        match outcome {
            InsertOutcome::Inserted(row) => {
                info!("Successfully stored {} wallet for {}", kind, user.id);
                Ok(summary(row))
            }
            InsertOutcome::DuplicateKey => {
                error!("{} wallet record exists already", kind);
                Err(WalletError::Conflict)
            }
            InsertOutcome::Failed(cause) => {
                error!("Error creating {} wallet: {:#}", kind, cause);
                Err(WalletError::InternalServerError(cause))
            }
        }
    }

    fn seal(
        &self,
        user: &User,
        platform: &PlatformDescriptor,
        fields: &WalletFields,
    ) -> Result<NewWallet, WalletError> {
        let record = self.security.record();

        let username = fields
            .username
            .as_deref()
            .map(|name| record.encrypt(Field::Username, name))
            .transpose()
            .map_err(WalletError::internal)?;
        let token = record
            .encrypt(Field::Token, &fields.token)
            .map_err(WalletError::internal)?;
        let unique_id = record
            .encrypt(Field::UniqueId, &fields.unique_id)
            .map_err(WalletError::internal)?;

        Ok(NewWallet {
            user_id: user.id.clone(),
            platform_id: platform.id.clone(),
            username: username.map(|u| u.e_info),
            unique_id: unique_id.e_info,
            unique_id_hash: self.security.hash(&fields.hash_input),
            iv: token.iv,
            token: token.e_info,
        })
    }

    pub async fn list_wallets(&self, user: &User) -> Result<Vec<WalletSummary>, WalletError> {
        let user_id = user.id.clone();
        let rows = self
            .blocking(move |store| store.wallets_for_user(&user_id))
            .await?;
        Ok(rows.into_iter().map(summary).collect())
    }

    /// Look up the wallet `user` linked to a plaintext identifier on a
    /// platform. For telegram the identifier is the serialized auth result.
    pub async fn find_wallet(
        &self,
        user: &User,
        platform: &PlatformDescriptor,
        identifier: &str,
    ) -> Result<Option<WalletSummary>, WalletError> {
        let row = self.owned_wallet_by_identifier(user, platform, identifier).await?;
        Ok(row.map(summary))
    }

    /// Replace the token of the wallet `user` linked to `identifier`.
    ///
    /// The record IV is shared by every field, so all of them are sealed
    /// again under a fresh IV. The lookup hash is left untouched.
    pub async fn update_token(
        &self,
        user: &User,
        platform: &PlatformDescriptor,
        identifier: &str,
        token: &Value,
    ) -> Result<WalletSummary, WalletError> {
        let Some(row) = self.owned_wallet_by_identifier(user, platform, identifier).await? else {
            error!("No {} token found for {}", platform.name, user.id);
            return Err(WalletError::NotFound);
        };
        self.reseal_token(row, token).await
    }

    /// Replace the token of wallet `id` owned by `user`.
    pub async fn update_wallet_token(
        &self,
        user: &User,
        id: i64,
        token: &Value,
    ) -> Result<WalletSummary, WalletError> {
        let row = self.owned_wallet(user, id).await?;
        self.reseal_token(row, token).await
    }

    /// Decrypt a wallet owned by `user`. Wallets of other users are `NotFound`.
    pub async fn reveal_wallet(&self, user: &User, id: i64) -> Result<RevealedWallet, WalletError> {
        let row = self.owned_wallet(user, id).await?;

        self.open(row).map_err(|e| {
            error!("Error decrypting wallet {}: {:#}", id, e);
            WalletError::InternalServerError(e)
        })
    }

    /// Unlink a wallet owned by `user`.
    pub async fn remove_wallet(&self, user: &User, id: i64) -> Result<(), WalletError> {
        let user_id = user.id.clone();
        let removed = self
            .blocking(move |store| store.remove(id, &user_id))
            .await?;

        if !removed {
            return Err(WalletError::NotFound);
        }
        info!("Removed wallet {} for {}", id, user.id);
        Ok(())
    }

    async fn owned_wallet(&self, user: &User, id: i64) -> Result<WalletRow, WalletError> {
        self.blocking(move |store| store.wallet(id))
            .await?
            .filter(|row| row.user_id == user.id)
            .ok_or(WalletError::NotFound)
    }

    async fn owned_wallet_by_identifier(
        &self,
        user: &User,
        platform: &PlatformDescriptor,
        identifier: &str,
    ) -> Result<Option<WalletRow>, WalletError> {
        // Identifiers pasted from clients often carry a trailing newline.
        let hash = self.security.hash(&identifier.replace('\n', ""));
        let platform_id = platform.id.clone();
        let row = self
            .blocking(move |store| store.wallet_by_hash(&platform_id, &hash))
            .await?;
        Ok(row.filter(|row| row.user_id == user.id))
    }

    async fn reseal_token(&self, row: WalletRow, token: &Value) -> Result<WalletSummary, WalletError> {
        let update = self.reseal(&row, token).map_err(|e| {
            error!("Error re-encrypting wallet {}: {:#}", row.id, e);
            WalletError::InternalServerError(e)
        })?;

        let updated = self.blocking(move |store| store.update(&update)).await?;
        if !updated {
            return Err(WalletError::NotFound);
        }

        info!("Successfully updated token for {}", row.user_id);
        Ok(summary(row))
    }

    fn reseal(&self, row: &WalletRow, token: &Value) -> anyhow::Result<WalletUpdate> {
        let username = row
            .username
            .as_deref()
            .map(|e_info| self.security.decrypt(Field::Username, e_info, &row.iv))
            .transpose()?;
        let unique_id = self.security.decrypt(Field::UniqueId, &row.unique_id, &row.iv)?;

        let record = self.security.record();
        let username = username
            .map(|name| record.encrypt(Field::Username, &name))
            .transpose()?;
        let token = record.encrypt(Field::Token, &serde_json::to_string(token)?)?;
        let unique_id = record.encrypt(Field::UniqueId, &unique_id)?;

        Ok(WalletUpdate {
            id: row.id,
            user_id: row.user_id.clone(),
            username: username.map(|u| u.e_info),
            unique_id: unique_id.e_info,
            iv: token.iv,
            token: token.e_info,
        })
    }

    fn open(&self, row: WalletRow) -> anyhow::Result<RevealedWallet> {
        let decrypt = |field: Field, e_info: &str| -> anyhow::Result<Value> {
            let plaintext = self.security.decrypt(field, e_info, &row.iv)?;
            Ok(serde_json::from_str(&plaintext)?)
        };

        let username = row
            .username
            .as_deref()
            .map(|e_info| decrypt(Field::Username, e_info))
            .transpose()?;
        let token = decrypt(Field::Token, &row.token)?;
        let unique_id = decrypt(Field::UniqueId, &row.unique_id)?;

        Ok(RevealedWallet {
            id: row.id,
            platform: row.platform_name,
            username,
            token,
            unique_id,
            created_at: row.created_at,
        })
    }

    async fn blocking<T, F>(&self, f: F) -> Result<T, WalletError>
    where
        F: FnOnce(&S) -> anyhow::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || f(store.as_ref()))
            .await
            .map_err(WalletError::internal)?
            .map_err(WalletError::InternalServerError)
    }
}

fn summary(row: WalletRow) -> WalletSummary {
    WalletSummary {
        id: row.id,
        platform_id: row.platform_id,
        platform: row.platform_name,
        created_at: row.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkvault_crypto::keys::generate_key;
    use linkvault_db::Database;
    use serde_json::json;

    struct Fixture {
        db: Arc<Database>,
        writer: WalletWriter<Database>,
    }

    fn fixture() -> Fixture {
        let db = Arc::new(Database::open_in_memory().unwrap());
        for id in ["u1", "u2"] {
            db.create_user(id, "phc-hash", &format!("key-{}", id)).unwrap();
        }
        let security = Security::new(&generate_key()).unwrap();
        let writer = WalletWriter::new(Arc::clone(&db), security);
        Fixture { db, writer }
    }

    fn user(id: &str) -> User {
        User { id: id.into() }
    }

    fn platform(db: &Database, name: &str) -> PlatformDescriptor {
        let row = db.get_platform_by_name(name).unwrap().unwrap();
        PlatformDescriptor {
            id: row.id,
            name: name.into(),
        }
    }

    fn gmail_result() -> Value {
        json!({ "profile": { "data": { "name": "Ann", "email": "ann@x.com" } }, "token": "t1" })
    }

    #[tokio::test]
    async fn gmail_wallet_is_encrypted_and_hashed_by_email() {
        let fx = fixture();
        let gmail = platform(&fx.db, "gmail");

        let stored = fx.writer.store_wallet(&user("u1"), &gmail, &gmail_result()).await.unwrap();
        assert_eq!(stored.platform, "gmail");

        let rows = fx.db.list_wallets_for_user("u1").unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.unique_id_hash, fx.writer.security().hash("ann@x.com"));
        assert!(!row.unique_id.contains("ann@x.com"));

        let security = fx.writer.security();
        assert_eq!(
            security.decrypt(Field::UniqueId, &row.unique_id, &row.iv).unwrap(),
            "\"ann@x.com\""
        );
        assert_eq!(
            security
                .decrypt(Field::Username, row.username.as_deref().unwrap(), &row.iv)
                .unwrap(),
            "\"Ann\""
        );
        assert_eq!(security.decrypt(Field::Token, &row.token, &row.iv).unwrap(), "\"t1\"");
    }

    #[tokio::test]
    async fn twitter_wallet_is_hashed_by_screen_name() {
        let fx = fixture();
        let twitter = platform(&fx.db, "twitter");
        let result = json!({ "profile": { "name": "Ann", "screen_name": "ann_x" }, "token": "t2" });

        fx.writer.store_wallet(&user("u1"), &twitter, &result).await.unwrap();

        let row = &fx.db.list_wallets_for_user("u1").unwrap()[0];
        let security = fx.writer.security();
        assert_eq!(row.unique_id_hash, security.hash("ann_x"));
        assert!(!row.unique_id.contains("ann_x"));
        assert_eq!(
            security
                .decrypt(Field::Username, row.username.as_deref().unwrap(), &row.iv)
                .unwrap(),
            "\"Ann\""
        );
        assert_eq!(security.decrypt(Field::Token, &row.token, &row.iv).unwrap(), "\"t2\"");
        assert_eq!(
            security.decrypt(Field::UniqueId, &row.unique_id, &row.iv).unwrap(),
            "\"ann_x\""
        );
    }

    #[tokio::test]
    async fn telegram_wallet_uses_whole_result() {
        let fx = fixture();
        let telegram = platform(&fx.db, "telegram");
        let result = json!({ "id": 42, "first_name": "Ann", "auth_date": 1700000000, "hash": "abc" });
        let raw = serde_json::to_string(&result).unwrap();

        fx.writer.store_wallet(&user("u1"), &telegram, &result).await.unwrap();

        let row = &fx.db.list_wallets_for_user("u1").unwrap()[0];
        let security = fx.writer.security();
        assert!(row.username.is_none());
        assert_eq!(row.unique_id_hash, security.hash(&raw));
        assert_eq!(security.decrypt(Field::Token, &row.token, &row.iv).unwrap(), raw);
        assert_eq!(security.decrypt(Field::UniqueId, &row.unique_id, &row.iv).unwrap(), raw);
    }

    #[tokio::test]
    async fn platform_name_is_case_insensitive() {
        let fx = fixture();
        let mut gmail = platform(&fx.db, "gmail");
        gmail.name = "GMail".into();

        fx.writer.store_wallet(&user("u1"), &gmail, &gmail_result()).await.unwrap();
        assert_eq!(fx.db.list_wallets_for_user("u1").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_platform_is_not_found() {
        let fx = fixture();
        let facebook = PlatformDescriptor {
            id: "00000000-0000-0000-0000-000000000001".into(),
            name: "facebook".into(),
        };

        let err = fx
            .writer
            .store_wallet(&user("u1"), &facebook, &gmail_result())
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::NotFound));
        assert!(fx.db.list_wallets_for_user("u1").unwrap().is_empty());
    }

    #[tokio::test]
    async fn second_link_of_same_identity_conflicts() {
        let fx = fixture();
        let gmail = platform(&fx.db, "gmail");

        fx.writer.store_wallet(&user("u1"), &gmail, &gmail_result()).await.unwrap();

        let same_user = fx.writer.store_wallet(&user("u1"), &gmail, &gmail_result()).await;
        assert!(matches!(same_user, Err(WalletError::Conflict)));

        let other_user = fx.writer.store_wallet(&user("u2"), &gmail, &gmail_result()).await;
        assert!(matches!(other_user, Err(WalletError::Conflict)));

        assert_eq!(fx.db.list_wallets_for_user("u1").unwrap().len(), 1);
        assert!(fx.db.list_wallets_for_user("u2").unwrap().is_empty());
    }

    #[tokio::test]
    async fn concurrent_links_yield_one_conflict() {
        let fx = fixture();
        let gmail = platform(&fx.db, "gmail");
        let result = gmail_result();
        let (ann, bob) = (user("u1"), user("u2"));

        let (a, b) = tokio::join!(
            fx.writer.store_wallet(&ann, &gmail, &result),
            fx.writer.store_wallet(&bob, &gmail, &result),
        );

        let outcomes = [a, b];
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(
            outcomes.iter().filter(|r| matches!(r, Err(WalletError::Conflict))).count(),
            1
        );
    }

    #[tokio::test]
    async fn malformed_result_is_internal_error() {
        let fx = fixture();
        let gmail = platform(&fx.db, "gmail");

        let err = fx
            .writer
            .store_wallet(&user("u1"), &gmail, &json!({ "profile": {} }))
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::InternalServerError(_)));
        assert!(fx.db.list_wallets_for_user("u1").unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_user_is_internal_error() {
        let fx = fixture();
        let gmail = platform(&fx.db, "gmail");

        let err = fx
            .writer
            .store_wallet(&user("ghost"), &gmail, &gmail_result())
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::InternalServerError(_)));
    }

    struct BrokenStore;

    impl WalletStore for BrokenStore {
        fn create(&self, _wallet: &NewWallet) -> InsertOutcome {
            InsertOutcome::Failed(anyhow::anyhow!("connection reset"))
        }

        fn wallets_for_user(&self, _user_id: &str) -> anyhow::Result<Vec<WalletRow>> {
            Ok(vec![])
        }

        fn wallet(&self, _id: i64) -> anyhow::Result<Option<WalletRow>> {
            Ok(None)
        }

        fn wallet_by_hash(&self, _platform_id: &str, _hash: &str) -> anyhow::Result<Option<WalletRow>> {
            Ok(None)
        }

        fn update(&self, _update: &WalletUpdate) -> anyhow::Result<bool> {
            Err(anyhow::anyhow!("connection reset"))
        }

        fn remove(&self, _id: i64, _user_id: &str) -> anyhow::Result<bool> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn store_failure_wraps_cause() {
        let writer = WalletWriter::new(Arc::new(BrokenStore), Security::new(&generate_key()).unwrap());
        let gmail = PlatformDescriptor {
            id: "p".into(),
            name: "gmail".into(),
        };

        match writer.store_wallet(&user("u1"), &gmail, &gmail_result()).await {
            Err(WalletError::InternalServerError(cause)) => {
                assert!(cause.to_string().contains("connection reset"));
            }
            other => panic!("expected InternalServerError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn reveal_find_and_remove() {
        let fx = fixture();
        let gmail = platform(&fx.db, "gmail");
        let stored = fx.writer.store_wallet(&user("u1"), &gmail, &gmail_result()).await.unwrap();

        let found = fx.writer.find_wallet(&user("u1"), &gmail, "ann@x.com").await.unwrap().unwrap();
        assert_eq!(found.id, stored.id);
        assert!(fx.writer.find_wallet(&user("u1"), &gmail, "bob@x.com").await.unwrap().is_none());
        assert!(fx.writer.find_wallet(&user("u2"), &gmail, "ann@x.com").await.unwrap().is_none());

        let revealed = fx.writer.reveal_wallet(&user("u1"), stored.id).await.unwrap();
        assert_eq!(revealed.username, Some(json!("Ann")));
        assert_eq!(revealed.unique_id, json!("ann@x.com"));
        assert_eq!(revealed.token, json!("t1"));

        let not_owner = fx.writer.reveal_wallet(&user("u2"), stored.id).await;
        assert!(matches!(not_owner, Err(WalletError::NotFound)));
        assert!(matches!(
            fx.writer.remove_wallet(&user("u2"), stored.id).await,
            Err(WalletError::NotFound)
        ));

        fx.writer.remove_wallet(&user("u1"), stored.id).await.unwrap();
        assert!(fx.writer.list_wallets(&user("u1")).await.unwrap().is_empty());

        // Unlinked identities can be linked again.
        fx.writer.store_wallet(&user("u2"), &gmail, &gmail_result()).await.unwrap();
    }

    #[tokio::test]
    async fn update_token_reseals_every_field() {
        let fx = fixture();
        let gmail = platform(&fx.db, "gmail");
        let stored = fx.writer.store_wallet(&user("u1"), &gmail, &gmail_result()).await.unwrap();
        let before = fx.db.get_wallet(stored.id).unwrap().unwrap();

        let updated = fx
            .writer
            .update_token(&user("u1"), &gmail, "ann@x.com\n", &json!("t9"))
            .await
            .unwrap();
        assert_eq!(updated.id, stored.id);

        let after = fx.db.get_wallet(stored.id).unwrap().unwrap();
        assert_ne!(after.iv, before.iv);
        assert_eq!(after.unique_id_hash, before.unique_id_hash);

        // Old ciphertexts do not open under the new IV.
        let security = fx.writer.security();
        let old_username = before.username.as_deref().unwrap();
        assert!(security.decrypt(Field::Username, old_username, &after.iv).is_err());

        let revealed = fx.writer.reveal_wallet(&user("u1"), stored.id).await.unwrap();
        assert_eq!(revealed.token, json!("t9"));
        assert_eq!(revealed.username, Some(json!("Ann")));
        assert_eq!(revealed.unique_id, json!("ann@x.com"));
    }

    #[tokio::test]
    async fn update_token_of_unknown_or_foreign_wallet_is_not_found() {
        let fx = fixture();
        let gmail = platform(&fx.db, "gmail");
        let stored = fx.writer.store_wallet(&user("u1"), &gmail, &gmail_result()).await.unwrap();

        let unknown = fx
            .writer
            .update_token(&user("u1"), &gmail, "bob@x.com", &json!("t9"))
            .await;
        assert!(matches!(unknown, Err(WalletError::NotFound)));

        let foreign = fx
            .writer
            .update_token(&user("u2"), &gmail, "ann@x.com", &json!("t9"))
            .await;
        assert!(matches!(foreign, Err(WalletError::NotFound)));

        let by_id = fx.writer.update_wallet_token(&user("u2"), stored.id, &json!("t9")).await;
        assert!(matches!(by_id, Err(WalletError::NotFound)));
        assert!(matches!(
            fx.writer.update_wallet_token(&user("u1"), stored.id + 1, &json!("t9")).await,
            Err(WalletError::NotFound)
        ));

        let revealed = fx.writer.reveal_wallet(&user("u1"), stored.id).await.unwrap();
        assert_eq!(revealed.token, json!("t1"));
    }

    #[tokio::test]
    async fn update_wallet_token_keeps_telegram_identity() {
        let fx = fixture();
        let telegram = platform(&fx.db, "telegram");
        let result = json!({ "id": 42, "first_name": "Ann", "auth_date": 1700000000, "hash": "abc" });
        let stored = fx.writer.store_wallet(&user("u1"), &telegram, &result).await.unwrap();

        fx.writer
            .update_wallet_token(&user("u1"), stored.id, &json!({ "session": "s2" }))
            .await
            .unwrap();

        let revealed = fx.writer.reveal_wallet(&user("u1"), stored.id).await.unwrap();
        assert!(revealed.username.is_none());
        assert_eq!(revealed.token, json!({ "session": "s2" }));
        assert_eq!(revealed.unique_id, result);

        let raw = serde_json::to_string(&result).unwrap();
        let found = fx.writer.find_wallet(&user("u1"), &telegram, &raw).await.unwrap();
        assert_eq!(found.map(|w| w.id), Some(stored.id));
    }
}
