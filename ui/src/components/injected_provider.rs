//! EIP-1193 provider injected by the browser wallet as `window.ethereum`.

use js_sys::{Function, Promise, Reflect};
use serde::Serialize;
use serde_json::{json, Value};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use atm_common::rpc::{ProviderError, INTERNAL_ERROR};
use atm_common::WalletProvider;

#[derive(Clone, Debug)]
pub struct InjectedProvider {
    ethereum: JsValue,
    name: String,
}

impl InjectedProvider {
    /// Look for `window.ethereum`. Returns `None` when no wallet extension
    /// injected one.
    pub fn detect() -> Option<Self> {
        let window = web_sys::window()?;
        let ethereum = Reflect::get(&window, &JsValue::from_str("ethereum")).ok()?;
        if ethereum.is_undefined() || ethereum.is_null() {
            return None;
        }
        let is_metamask = Reflect::get(&ethereum, &JsValue::from_str("isMetaMask"))
            .ok()
            .and_then(|flag| flag.as_bool())
            .unwrap_or(false);
        let name = if is_metamask { "MetaMask" } else { "injected" };
        Some(Self {
            ethereum,
            name: name.to_string(),
        })
    }
}

impl WalletProvider for InjectedProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        tracing::debug!("{method} {params}");

        let args = json!({ "method": method, "params": params })
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| ProviderError::internal(format!("Failed to encode request: {e}")))?;

        let request: Function = Reflect::get(&self.ethereum, &JsValue::from_str("request"))
            .map_err(provider_error)?
            .dyn_into()
            .map_err(|_| ProviderError::internal("Provider has no request function"))?;

        let promise: Promise = request
            .call1(&self.ethereum, &args)
            .map_err(provider_error)?
            .dyn_into()
            .map_err(|_| ProviderError::internal("Provider request did not return a promise"))?;

        let result = JsFuture::from(promise).await.map_err(provider_error)?;
        if result.is_undefined() || result.is_null() {
            return Ok(Value::Null);
        }
        serde_wasm_bindgen::from_value(result)
            .map_err(|e| ProviderError::internal(format!("Failed to decode response: {e}")))
    }

    fn provider_name(&self) -> &str {
        &self.name
    }

    async fn pause(&self, millis: u32) {
        gloo_timers::future::TimeoutFuture::new(millis).await;
    }
}

/// Read `{ code, message }` off a rejected request.
fn provider_error(value: JsValue) -> ProviderError {
    let code = Reflect::get(&value, &JsValue::from_str("code"))
        .ok()
        .and_then(|code| code.as_f64())
        .map_or(INTERNAL_ERROR, |code| code as i64);
    let message = Reflect::get(&value, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .unwrap_or_else(|| format!("{value:?}"));
    ProviderError::new(code, message)
}
