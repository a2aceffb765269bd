//! PostgreSQL implementation of MessageRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use atelier_core::entities::{Message, ModerationStatus, Participant};
use atelier_core::traits::{MessagePatch, MessageQuery, MessageRepository, PatchOutcome, RepoResult};
use atelier_core::value_objects::{MessageId, UserId, VisibilityFilter};

use crate::mappers::messages_from_models;
use crate::models::{MessageModel, PatchedMessageModel};

use super::error::map_db_error;

macro_rules! message_columns {
    () => {
        "id, sender_id, recipient_id, context_type, context_id, subject, body, \
         moderation_status, tone_score, flagged_reason, reviewed_by, reviewed_at, \
         review_note, read_at, hidden_by_sender, hidden_by_recipient, created_at"
    };
}

/// Conditional single-row update.
///
/// `target` locks the row (and applies the status guard) so `changed` can be
/// computed against the pre-image within the same statement.
const UPDATE_FIELDS_SQL: &str = r#"
    WITH target AS (
        SELECT id, moderation_status, read_at, hidden_by_sender, hidden_by_recipient
        FROM messages
        WHERE id = $1 AND ($2::text IS NULL OR moderation_status = $2)
        FOR UPDATE
    )
    UPDATE messages m
    SET moderation_status = COALESCE($3::text, m.moderation_status),
        reviewed_by = CASE WHEN $3::text IS NULL THEN m.reviewed_by ELSE $4::uuid END,
        reviewed_at = CASE WHEN $3::text IS NULL THEN m.reviewed_at ELSE $5::timestamptz END,
        review_note = CASE WHEN $3::text IS NULL THEN m.review_note ELSE $6::text END,
        read_at = COALESCE(m.read_at, $7::timestamptz),
        hidden_by_sender = m.hidden_by_sender OR $8,
        hidden_by_recipient = m.hidden_by_recipient OR $9
    FROM target t
    WHERE m.id = t.id
    RETURNING m.id, m.sender_id, m.recipient_id, m.context_type, m.context_id, m.subject,
              m.body, m.moderation_status, m.tone_score, m.flagged_reason, m.reviewed_by,
              m.reviewed_at, m.review_note, m.read_at, m.hidden_by_sender,
              m.hidden_by_recipient, m.created_at,
              (t.moderation_status IS DISTINCT FROM m.moderation_status
                OR t.read_at IS DISTINCT FROM m.read_at
                OR t.hidden_by_sender <> m.hidden_by_sender
                OR t.hidden_by_recipient <> m.hidden_by_recipient) AS changed
"#;

/// PostgreSQL implementation of MessageRepository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Create a new PgMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: MessageId) -> RepoResult<Option<Message>> {
        let result = sqlx::query_as::<_, MessageModel>(concat!(
            "SELECT ",
            message_columns!(),
            " FROM messages WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Message::try_from).transpose()
    }

    #[instrument(skip(self, message), fields(message_id = %message.id))]
    async fn create(&self, message: &Message) -> RepoResult<()> {
        let (context_type, context_id) = match &message.context {
            Some(ctx) => (Some(ctx.context_type.as_str()), Some(ctx.context_id.as_str())),
            None => (None, None),
        };

        sqlx::query(concat!(
            "INSERT INTO messages (",
            message_columns!(),
            ") VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)"
        ))
        .bind(message.id.into_inner())
        .bind(message.sender_id.into_inner())
        .bind(message.recipient_id.into_inner())
        .bind(context_type)
        .bind(context_id)
        .bind(&message.subject)
        .bind(&message.body)
        .bind(message.moderation_status.as_str())
        .bind(message.tone_score)
        .bind(message.flagged_reason.as_deref())
        .bind(message.reviewed_by.map(UserId::into_inner))
        .bind(message.reviewed_at)
        .bind(message.review_note.as_deref())
        .bind(message.read_at)
        .bind(message.hidden_by_sender)
        .bind(message.hidden_by_recipient)
        .bind(message.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_fields(&self, id: MessageId, patch: &MessagePatch) -> RepoResult<Option<PatchOutcome>> {
        let moderation = patch.moderation.as_ref();

        let row = sqlx::query_as::<_, PatchedMessageModel>(UPDATE_FIELDS_SQL)
            .bind(id.into_inner())
            .bind(patch.expected_status.map(ModerationStatus::as_str))
            .bind(moderation.map(|d| d.status.as_str()))
            .bind(moderation.map(|d| d.reviewed_by.into_inner()))
            .bind(moderation.map(|d| d.reviewed_at))
            .bind(moderation.and_then(|d| d.note.as_deref()))
            .bind(patch.read_at)
            .bind(patch.hide_for_sender)
            .bind(patch.hide_for_recipient)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        row.map(|row| {
            Ok(PatchOutcome {
                message: Message::try_from(row.message)?,
                changed: row.changed,
            })
        })
        .transpose()
    }

    #[instrument(skip(self))]
    async fn find_visible(&self, filter: &VisibilityFilter, query: &MessageQuery) -> RepoResult<Vec<Message>> {
        // Each side only ever consults its own hide flag
        let sql = match filter.side {
            Participant::Recipient => concat!(
                "SELECT ",
                message_columns!(),
                " FROM messages
                WHERE recipient_id = $1 AND NOT hidden_by_recipient
                  AND ($2::text IS NULL OR moderation_status = $2)
                  AND ($3::timestamptz IS NULL OR created_at < $3)
                  AND ($4::timestamptz IS NULL OR created_at > $4)
                ORDER BY created_at DESC, id DESC
                LIMIT $5"
            ),
            Participant::Sender => concat!(
                "SELECT ",
                message_columns!(),
                " FROM messages
                WHERE sender_id = $1 AND NOT hidden_by_sender
                  AND ($2::text IS NULL OR moderation_status = $2)
                  AND ($3::timestamptz IS NULL OR created_at < $3)
                  AND ($4::timestamptz IS NULL OR created_at > $4)
                ORDER BY created_at DESC, id DESC
                LIMIT $5"
            ),
        };

        let rows = sqlx::query_as::<_, MessageModel>(sql)
            .bind(filter.viewer_id.into_inner())
            .bind(filter.required_status.map(ModerationStatus::as_str))
            .bind(query.before)
            .bind(query.after)
            .bind(query.effective_limit())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        messages_from_models(rows)
    }

    #[instrument(skip(self))]
    async fn find_pending(&self, query: &MessageQuery) -> RepoResult<Vec<Message>> {
        let rows = sqlx::query_as::<_, MessageModel>(concat!(
            "SELECT ",
            message_columns!(),
            " FROM messages
            WHERE moderation_status = 'pending_review'
              AND ($1::timestamptz IS NULL OR created_at < $1)
              AND ($2::timestamptz IS NULL OR created_at > $2)
            ORDER BY created_at ASC, id ASC
            LIMIT $3"
        ))
        .bind(query.before)
        .bind(query.after)
        .bind(query.effective_limit())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        messages_from_models(rows)
    }

    #[instrument(skip(self))]
    async fn count_unread(&self, recipient: UserId) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM messages
            WHERE recipient_id = $1
              AND read_at IS NULL
              AND moderation_status = 'approved'
              AND NOT hidden_by_recipient
            "#,
        )
        .bind(recipient.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn find_erasable(&self, limit: i64) -> RepoResult<Vec<MessageId>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT id
            FROM messages
            WHERE hidden_by_sender AND hidden_by_recipient
            ORDER BY created_at ASC
            LIMIT $1
            "#,
        )
        .bind(limit.max(1))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids.into_iter().map(MessageId::from_uuid).collect())
    }

    #[instrument(skip(self))]
    async fn erase(&self, id: MessageId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}
