//! Data object model: binds a backend object to a local (optionally reactive)
//! data object.
//!
//! The model loads an object by id through a getter endpoint and
//! overwrite-merges the result into its target, and saves the target back
//! through a setter endpoint. Endpoints answer with the usual
//! `{result}` / `{error}` envelope.

use leptos::logging::warn;
use serde_json::{json, Map, Value};

use crate::config::{DATA_FIELD, OID_FIELD};
use crate::core::dispatcher::EndpointDispatcher;
use crate::core::error::ApiError;
use crate::core::merge::{MergeMode, MergeTarget};
use crate::models::{is_truthy, ApiOutcome, ApiResponse};

/// Bridges a backend data object and a [`MergeTarget`].
#[derive(Debug, Clone)]
pub struct DataObjectModel<D, T = Map<String, Value>> {
    dispatcher: D,
    oid: Option<String>,
    get_path: Option<String>,
    set_path: Option<String>,
    model: T,
}

impl<D: EndpointDispatcher> DataObjectModel<D> {
    /// A model backed by a plain JSON map.
    pub fn new(dispatcher: D) -> Self {
        Self::with_target(dispatcher, Map::new())
    }
}

impl<D: EndpointDispatcher, T: MergeTarget> DataObjectModel<D, T> {
    /// A model that merges into `model`, e.g. a leptos `RwSignal`.
    pub fn with_target(dispatcher: D, model: T) -> Self {
        Self {
            dispatcher,
            oid: None,
            get_path: None,
            set_path: None,
            model,
        }
    }

    pub fn oid(mut self, oid: impl Into<String>) -> Self {
        self.oid = Some(oid.into());
        self
    }

    /// Endpoint used by [`load`](Self::load).
    pub fn api_get(mut self, path: impl Into<String>) -> Self {
        self.get_path = Some(path.into());
        self
    }

    /// Endpoint used by [`save`](Self::save).
    pub fn api_set(mut self, path: impl Into<String>) -> Self {
        self.set_path = Some(path.into());
        self
    }

    /// Configure both endpoints at once.
    pub fn api(self, get_path: impl Into<String>, set_path: impl Into<String>) -> Self {
        self.api_get(get_path).api_set(set_path)
    }

    pub fn current_oid(&self) -> Option<&str> {
        self.oid.as_deref()
    }

    pub fn model(&self) -> &T {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut T {
        &mut self.model
    }

    /// Load the object and overwrite-merge it into the model.
    ///
    /// A given `oid` replaces the configured one. Returns a snapshot of the
    /// model after merging.
    pub async fn load(&mut self, oid: Option<&str>) -> Result<Map<String, Value>, ApiError> {
        let oid = self.resolve_oid(oid)?;
        let path = self.get_path.clone().ok_or(ApiError::NotConfigured("apiGet"))?;

        let raw = self
            .dispatcher
            .call_endpoint(&path, &[json!({ OID_FIELD: oid })])
            .await?;

        match ApiResponse::from_value(raw).into_outcome() {
            ApiOutcome::ApplicationError(msg) => Err(ApiError::Application(msg)),
            ApiOutcome::Success(result) if is_truthy(&result) => {
                let data = match result {
                    Value::Object(fields) => fields,
                    other => {
                        warn!("{path}: non-object result for {oid}: {other}");
                        Map::new()
                    }
                };
                self.model.merge(&data, MergeMode::Overwrite);
                Ok(self.model.snapshot())
            }
            other => Err(ApiError::MissingResult(format!("{other:?}"))),
        }
    }

    /// Save the model through the setter endpoint.
    ///
    /// Any `result` other than an explicit `null` counts as success, including
    /// `false`. An object envelope without a `result` field also succeeds and
    /// yields `Value::Null`.
    pub async fn save(&mut self, oid: Option<&str>) -> Result<Value, ApiError> {
        let oid = self.resolve_oid(oid)?;
        let path = self.set_path.clone().ok_or(ApiError::NotConfigured("apiSet"))?;
        let payload = json!({ OID_FIELD: oid, DATA_FIELD: self.model.snapshot() });

        let raw = self.dispatcher.call_endpoint(&path, &[payload]).await?;

        let response = ApiResponse::from_value(raw);
        match response.outcome() {
            ApiOutcome::ApplicationError(msg) => Err(ApiError::Application(msg.clone())),
            ApiOutcome::Success(result) if !result.is_null() => Ok(result.clone()),
            ApiOutcome::Empty if response.envelope().is_object() => Ok(Value::Null),
            _ => Err(ApiError::MissingResult(response.envelope().to_string())),
        }
    }

    fn resolve_oid(&mut self, oid: Option<&str>) -> Result<String, ApiError> {
        if let Some(oid) = oid.filter(|oid| !oid.is_empty()) {
            self.oid = Some(oid.to_string());
        }
        self.oid.clone().ok_or(ApiError::NotConfigured("_oid"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use futures::future::{FutureExt, LocalBoxFuture};

    type Calls = Rc<RefCell<Vec<(String, Vec<Value>)>>>;

    /// Dispatcher answering every call with `response`, recording calls.
    fn answering(
        response: Result<Value, ApiError>,
        calls: Calls,
    ) -> impl Fn(&str, &[Value]) -> LocalBoxFuture<'static, Result<Value, ApiError>> {
        move |path: &str, args: &[Value]| {
            calls.borrow_mut().push((path.to_string(), args.to_vec()));
            let response = response.clone();
            async move { response }.boxed_local()
        }
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_load_overwrites_model() {
        let calls = Calls::default();
        let dispatcher = answering(Ok(json!({"result": {"name": "Ada"}})), calls.clone());
        let mut model = DataObjectModel::with_target(dispatcher, object(json!({"name": "?", "age": 3})))
            .oid("obj-1")
            .api("table.get", "table.set");

        let loaded = model.load(None).await.unwrap();
        assert_eq!(Value::Object(loaded), json!({"name": "Ada", "age": null}));
        assert_eq!(
            calls.borrow().as_slice(),
            &[("table.get".to_string(), vec![json!({"_oid": "obj-1"})])]
        );
    }

    #[tokio::test]
    async fn test_load_with_new_oid_replaces_configured() {
        let calls = Calls::default();
        let dispatcher = answering(Ok(json!({"result": {"v": 1}})), calls.clone());
        let mut model = DataObjectModel::new(dispatcher).oid("old").api_get("obj.get");

        model.load(Some("new")).await.unwrap();
        assert_eq!(model.current_oid(), Some("new"));
        assert_eq!(calls.borrow()[0].1, vec![json!({"_oid": "new"})]);
    }

    #[tokio::test]
    async fn test_load_application_error() {
        let dispatcher = answering(Ok(json!({"ERROR": "no access"})), Calls::default());
        let mut model = DataObjectModel::new(dispatcher).oid("x").api_get("obj.get");

        assert_eq!(
            model.load(None).await,
            Err(ApiError::Application("no access".into()))
        );
    }

    #[tokio::test]
    async fn test_load_missing_result() {
        let dispatcher = answering(Ok(json!({"result": null})), Calls::default());
        let mut model = DataObjectModel::new(dispatcher).oid("x").api_get("obj.get");

        assert!(matches!(
            model.load(None).await,
            Err(ApiError::MissingResult(_))
        ));
    }

    #[tokio::test]
    async fn test_load_forwards_transport_error() {
        let err = ApiError::Rejected("offline".into());
        let dispatcher = answering(Err(err.clone()), Calls::default());
        let mut model = DataObjectModel::new(dispatcher).oid("x").api_get("obj.get");

        assert_eq!(model.load(None).await, Err(err));
    }

    #[tokio::test]
    async fn test_load_requires_configuration() {
        let dispatcher = answering(Ok(json!({"result": {}})), Calls::default());
        let mut model = DataObjectModel::new(dispatcher);
        assert_eq!(
            model.load(None).await,
            Err(ApiError::NotConfigured("_oid"))
        );

        let mut model = model.oid("x");
        assert_eq!(
            model.load(None).await,
            Err(ApiError::NotConfigured("apiGet"))
        );
    }

    #[tokio::test]
    async fn test_save_sends_model_and_accepts_false() {
        let calls = Calls::default();
        let dispatcher = answering(Ok(json!({"result": false})), calls.clone());
        let mut model = DataObjectModel::with_target(dispatcher, object(json!({"name": "Ada"})))
            .oid("obj-1")
            .api_set("table.set");

        assert_eq!(model.save(None).await, Ok(json!(false)));
        assert_eq!(
            calls.borrow()[0],
            (
                "table.set".to_string(),
                vec![json!({"_oid": "obj-1", "data": {"name": "Ada"}})]
            )
        );
    }

    #[tokio::test]
    async fn test_save_errors() {
        let dispatcher = answering(Ok(json!({"error": "read only"})), Calls::default());
        let mut model = DataObjectModel::new(dispatcher).oid("x").api_set("obj.set");
        assert_eq!(
            model.save(None).await,
            Err(ApiError::Application("read only".into()))
        );

        let dispatcher = answering(Ok(json!({"result": null})), Calls::default());
        let mut model = DataObjectModel::new(dispatcher).oid("x").api_set("obj.set");
        assert_eq!(
            model.save(None).await,
            Err(ApiError::MissingResult(r#"{"result":null}"#.into()))
        );

        let dispatcher = answering(Ok(Value::Null), Calls::default());
        let mut model = DataObjectModel::new(dispatcher).oid("x").api_set("obj.set");
        assert!(matches!(
            model.save(None).await,
            Err(ApiError::MissingResult(_))
        ));
    }

    #[tokio::test]
    async fn test_save_without_result_field_succeeds() {
        let dispatcher = answering(Ok(json!({"saved_at": 1700000000})), Calls::default());
        let mut model = DataObjectModel::new(dispatcher).oid("x").api_set("obj.set");
        assert_eq!(model.save(None).await, Ok(Value::Null));

        let dispatcher = answering(Ok(json!({})), Calls::default());
        let mut model = DataObjectModel::new(dispatcher).oid("x").api_set("obj.set");
        assert_eq!(model.save(None).await, Ok(Value::Null));
    }
}
