//! Typed wrappers for every API endpoint.
//!
//! Mutations that the server only acknowledges return the raw payload.

use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use uuid::Uuid;

use wordcard_core::error::ApiFailure;
use wordcard_core::model::{StudyDeck, Word, WordSet};
use wordcard_runtime::CancelToken;

use crate::client::{ApiClient, PostBody};
use crate::requests::*;
use crate::schema::{
    FeedbackResponse, FrontEndUser, LibPage, Mail, MessagePayload, NewWordSetResponse,
    PopularWordSetResponse, RecentVisitResponse, SearchWordSetCardResponse, UserLink,
    WordSetCardPreview,
};

type ApiResult<T> = Result<T, ApiFailure>;

impl ApiClient {
    // Queries

    /// The logged-in user, if the session cookie is still valid.
    pub async fn check_log_in(&self) -> ApiResult<FrontEndUser> {
        self.get_request(&["checkLogIn"], &[], None).await
    }

    pub async fn get_word_set(&self, id: &str, cancel: Option<&CancelToken>) -> ApiResult<WordSet> {
        self.get_request(&["getWordSet", id], &[], cancel).await
    }

    /// The words of a set, shaped for studying.
    pub async fn get_words(&self, id: &str, cancel: Option<&CancelToken>) -> ApiResult<StudyDeck> {
        self.get_request(&["getWords", id], &[], cancel).await
    }

    /// Search public word sets. `cur_number` is the number already shown.
    pub async fn search_word_sets(
        &self,
        query: &str,
        cur_number: usize,
        cancel: Option<&CancelToken>,
    ) -> ApiResult<SearchWordSetCardResponse> {
        let cur_number = cur_number.to_string();
        self.get_request(
            &["getWordSetCard"],
            &[("query", query), ("curNumber", &cur_number)],
            cancel,
        )
        .await
    }

    pub async fn get_preview_words(
        &self,
        word_set_id: &str,
        cur_number: usize,
        cancel: Option<&CancelToken>,
    ) -> ApiResult<WordSetCardPreview> {
        let cur_number = cur_number.to_string();
        self.get_request(
            &["getPreviewWords"],
            &[("wordSetID", word_set_id), ("curNumber", &cur_number)],
            cancel,
        )
        .await
    }

    pub async fn get_new_word_sets(&self) -> ApiResult<NewWordSetResponse> {
        self.get_request(&["getNewWordSet"], &[], None).await
    }

    pub async fn get_popular_word_sets(&self) -> ApiResult<PopularWordSetResponse> {
        self.get_request(&["getPopularWordSet"], &[], None).await
    }

    pub async fn get_recent_visits(&self, user_id: &str) -> ApiResult<RecentVisitResponse> {
        self.get_request(&["getRecentVisit", user_id], &[], None).await
    }

    pub async fn get_library(&self, user_id: &str) -> ApiResult<LibPage> {
        self.get_request(&["getWordSetsInLib", user_id], &[], None).await
    }

    pub async fn get_feedback(&self, cur_number: usize) -> ApiResult<FeedbackResponse> {
        let cur_number = cur_number.to_string();
        self.get_request(&["getFeedback"], &[("curNumber", &cur_number)], None)
            .await
    }

    pub async fn get_mails(&self, user_id: &str) -> ApiResult<Vec<Mail>> {
        self.get_request(&["getMails", user_id], &[], None).await
    }

    pub async fn get_unread_mail_count(&self, user_id: &str) -> ApiResult<u64> {
        self.get_request(&["getUnreadMailsCnt", user_id], &[], None).await
    }

    pub async fn get_user_link(&self, user_id: &str) -> ApiResult<UserLink> {
        self.get_request(&["getUserLink", user_id], &[], None).await
    }

    // Account

    pub async fn log_in(&self, email: &str, password: &str) -> ApiResult<FrontEndUser> {
        let body = PostBody::json(&LogInRequest {
            user_email: email.to_string(),
            user_password: password.to_string(),
        })?;
        self.post_request(&["accountPasswordLogIn"], body, None).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<FrontEndUser> {
        self.post_request(&["accountPasswordRegister"], PostBody::json(request)?, None)
            .await
    }

    pub async fn log_out(&self) -> ApiResult<Value> {
        self.post_request(&["logOut"], PostBody::empty(), None).await
    }

    pub async fn change_user_name(&self, user_id: &str, new_name: &str) -> ApiResult<Value> {
        let body = PostBody::json(&ChangeUserNameRequest {
            user_id: user_id.to_string(),
            new_name: new_name.to_string(),
        })?;
        self.post_request(&["changeUserName"], body, None).await
    }

    /// Upload a new profile image as a multipart form.
    pub async fn change_user_image(
        &self,
        user_id: &str,
        file_name: &str,
        image: Vec<u8>,
    ) -> ApiResult<Value> {
        let form = Form::new()
            .part("image", Part::bytes(image).file_name(file_name.to_string()))
            .text("userID", user_id.to_string());
        self.post_request(&["changeUserImage"], PostBody::Form(form), None)
            .await
    }

    // Word sets

    /// Create a word set. The payload message is the new set's id.
    pub async fn create_word_set(&self, user_id: &str, word_set: &WordSet) -> ApiResult<String> {
        let body = PostBody::json(&CreateWordSetRequest {
            user_id: user_id.to_string(),
            word_set: word_set.clone(),
        })?;
        let created: MessagePayload = self.post_request(&["createWordSet"], body, None).await?;
        Ok(created.message)
    }

    pub async fn update_word_set(&self, request: &EditWordSetRequest) -> ApiResult<Value> {
        self.post_request(&["updateWordSet"], PostBody::json(request)?, None)
            .await
    }

    pub async fn delete_word_set(&self, word_set_id: &str) -> ApiResult<Value> {
        let body = PostBody::json(&WordSetIdRequest {
            word_set_id: word_set_id.to_string(),
        })?;
        self.post_request(&["deleteWordSet"], body, None).await
    }

    pub async fn toggle_like_word_set(&self, user_id: &str, word_set_id: &str) -> ApiResult<Value> {
        self.post_user_word_set("toggleLikeWordSet", user_id, word_set_id)
            .await
    }

    pub async fn fork_word_set(&self, user_id: &str, word_set_id: &str) -> ApiResult<Value> {
        self.post_user_word_set("forkWordSet", user_id, word_set_id).await
    }

    pub async fn add_recent_visit(&self, user_id: &str, word_set_id: &str) -> ApiResult<Value> {
        self.post_user_word_set("addRecentVisit", user_id, word_set_id)
            .await
    }

    pub async fn toggle_allow_copy(&self, user_id: &str, word_set_id: &str) -> ApiResult<Value> {
        self.post_user_word_set("toggleAllowCopy", user_id, word_set_id)
            .await
    }

    pub async fn toggle_is_public(&self, user_id: &str, word_set_id: &str) -> ApiResult<Value> {
        self.post_user_word_set("toggleIsPublic", user_id, word_set_id)
            .await
    }

    async fn post_user_word_set(
        &self,
        endpoint: &str,
        user_id: &str,
        word_set_id: &str,
    ) -> ApiResult<Value> {
        let body = PostBody::json(&UserWordSetRequest {
            user_id: user_id.to_string(),
            word_set_id: word_set_id.to_string(),
        })?;
        self.post_request(&[endpoint], body, None).await
    }

    // Words

    pub async fn add_word(&self, word_set_id: &str, word: &Word) -> ApiResult<Value> {
        let body = PostBody::json(&AddWordRequest {
            word_set_id: word_set_id.to_string(),
            word: word.clone(),
        })?;
        self.post_request(&["addWord"], body, None).await
    }

    pub async fn toggle_word_star(&self, word_set_id: &str, word_id: &str) -> ApiResult<Value> {
        let body = PostBody::json(&ToggleWordStarRequest {
            word_set_id: word_set_id.to_string(),
            word_id: word_id.to_string(),
        })?;
        self.post_request(&["toggleWordStar"], body, None).await
    }

    pub async fn toggle_all_word_star(&self, word_set_id: &str, new_star: bool) -> ApiResult<Value> {
        let body = PostBody::json(&ToggleAllWordStarRequest {
            word_set_id: word_set_id.to_string(),
            new_star,
        })?;
        self.post_request(&["toggleAllWordStar"], body, None).await
    }

    pub async fn inline_update_word(&self, request: &InlineUpdateWordRequest) -> ApiResult<Value> {
        self.post_request(&["inlineUpdateWord"], PostBody::json(request)?, None)
            .await
    }

    pub async fn big_word_card_update_word(
        &self,
        request: &BigWordCardUpdateWordRequest,
    ) -> ApiResult<Value> {
        self.post_request(&["bigWordCardUpdateWord"], PostBody::json(request)?, None)
            .await
    }

    // Mail, feedback and error reports

    pub async fn read_mail(&self, user_id: &str, mail_id: &str) -> ApiResult<Value> {
        let body = PostBody::json(&ReadMailRequest {
            user_id: user_id.to_string(),
            mail_id: mail_id.to_string(),
        })?;
        self.post_request(&["readMail"], body, None).await
    }

    pub async fn create_feedback(&self, author_id: &str, title: &str, content: &str) -> ApiResult<Value> {
        let body = PostBody::json(&CreateFeedbackRequest {
            author_id: author_id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
        })?;
        self.post_request(&["createFeedback"], body, None).await
    }

    /// Report an error to the backend under a fresh error id, which is returned.
    pub async fn log_error(&self, user_id: &str, error: &str, error_info: &str) -> ApiResult<String> {
        let error_id = Uuid::new_v4().to_string();
        let body = PostBody::json(&LogErrorRequest {
            user_id: user_id.to_string(),
            error_id: error_id.clone(),
            error: error.to_string(),
            error_info: error_info.to_string(),
            time: Utc::now().to_rfc3339(),
        })?;
        let _: Value = self.post_request(&["logError"], body, None).await?;
        tracing::info!(%error_id, "error reported");
        Ok(error_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn success(payload: Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({"type": "Success", "payload": payload}))
    }

    fn word(id: &str, vocabulary: &str) -> Value {
        json!({
            "id": id, "order": 1, "vocabulary": vocabulary, "definition": "d",
            "vocabularySound": "en-US", "definitionSound": "zh-TW", "star": false
        })
    }

    async fn setup() -> (MockServer, ApiClient) {
        let server = MockServer::start().await;
        let client = ApiClient::new(&server.uri(), Duration::from_secs(5)).unwrap();
        (server, client)
    }

    #[tokio::test]
    async fn get_words_returns_study_deck() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path("/getWords/s1"))
            .respond_with(success(json!({
                "id": "s1", "title": "Fruit", "shouldSwap": true,
                "words": [word("w1", "apple"), word("w2", "pear")]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let deck = client.get_words("s1", None).await.unwrap();
        assert_eq!(deck.title, "Fruit");
        assert_eq!(deck.words.len(), 2);
        assert!(deck.should_swap);
    }

    #[tokio::test]
    async fn search_sends_query_and_offset() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path("/getWordSetCard"))
            .and(query_param("query", "fruit"))
            .and(query_param("curNumber", "20"))
            .respond_with(success(json!({"wordSetCards": [], "haveMore": false})))
            .mount(&server)
            .await;

        let result = client.search_word_sets("fruit", 20, None).await.unwrap();
        assert!(result.word_set_cards.is_empty());
        assert!(!result.have_more);
    }

    #[tokio::test]
    async fn unread_count_is_a_plain_number() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path("/getUnreadMailsCnt/u1"))
            .respond_with(success(json!(4)))
            .mount(&server)
            .await;

        assert_eq!(client.get_unread_mail_count("u1").await.unwrap(), 4);
    }

    #[tokio::test]
    async fn create_word_set_returns_new_id() {
        let (server, client) = setup().await;
        Mock::given(method("POST"))
            .and(path("/createWordSet"))
            .and(body_partial_json(json!({"userID": "u1", "wordSet": {"title": "Fruit"}})))
            .respond_with(success(json!({"message": "new-set"})))
            .mount(&server)
            .await;

        let set = WordSet {
            id: String::new(),
            title: "Fruit".into(),
            description: String::new(),
            author_id: "u1".into(),
            created_at: String::new(),
            updated_at: 0,
            words: vec![],
            should_swap: false,
            liked_users: vec![],
            likes: 0,
            word_cnt: 0,
            allow_copy: true,
            is_public: true,
        };
        assert_eq!(client.create_word_set("u1", &set).await.unwrap(), "new-set");
    }

    #[tokio::test]
    async fn toggles_send_user_and_set_ids() {
        let (server, client) = setup().await;
        Mock::given(method("POST"))
            .and(path("/toggleLikeWordSet"))
            .and(body_json(json!({"userID": "u1", "wordSetID": "s1"})))
            .respond_with(success(json!({"message": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        client.toggle_like_word_set("u1", "s1").await.unwrap();
    }

    #[tokio::test]
    async fn log_out_posts_empty_object() {
        let (server, client) = setup().await;
        Mock::given(method("POST"))
            .and(path("/logOut"))
            .and(body_json(json!({})))
            .respond_with(success(json!({"message": "bye"})))
            .expect(1)
            .mount(&server)
            .await;

        client.log_out().await.unwrap();
    }

    #[tokio::test]
    async fn log_error_sends_fresh_error_id() {
        let (server, client) = setup().await;
        Mock::given(method("POST"))
            .and(path("/logError"))
            .and(body_partial_json(json!({"userID": "u1", "error": "boom"})))
            .respond_with(success(json!({"message": "logged"})))
            .mount(&server)
            .await;

        let id = client.log_error("u1", "boom", "stack").await.unwrap();
        assert!(Uuid::parse_str(&id).is_ok());

        let requests = server.received_requests().await.unwrap();
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["errorID"], id.as_str());
        assert!(chrono::DateTime::parse_from_rfc3339(body["time"].as_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn change_user_image_is_multipart() {
        let (server, client) = setup().await;
        Mock::given(method("POST"))
            .and(path("/changeUserImage"))
            .respond_with(success(json!("https://img.example/u1.png")))
            .mount(&server)
            .await;

        let url = client
            .change_user_image("u1", "me.png", vec![1, 2, 3])
            .await
            .unwrap();
        assert_eq!(url, "https://img.example/u1.png");

        let requests = server.received_requests().await.unwrap();
        let content_type = requests[0].headers.get("content-type").unwrap().to_str().unwrap();
        assert!(content_type.starts_with("multipart/form-data"));
    }
}
