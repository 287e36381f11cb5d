//! 基于 chromiumoxide 的 UiDriver 实现
//!
//! 所有页面操作都通过 JsExecutor 执行脚本完成

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::browser::{
    SetDownloadBehaviorBehavior, SetDownloadBehaviorParams,
};
use serde::Deserialize;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult, BrowserError};
use crate::infrastructure::js_executor::{js_string, JsExecutor};
use crate::infrastructure::ui_driver::{FieldKind, TableRow, UiDriver};

/// 页面稳定检查的次数上限（每次 200ms）
const SETTLE_ATTEMPTS: usize = 50;

/// 点击失败后重试前的等待
const CLICK_RETRY_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Deserialize)]
struct TextLookup {
    found: bool,
    text: String,
}

/// Chrome 浏览器驱动
pub struct ChromeDriver {
    executor: JsExecutor,
}

impl ChromeDriver {
    pub fn new(executor: JsExecutor) -> Self {
        Self { executor }
    }

    /// 等待页面加载完成
    ///
    /// 点击可能触发导航，导航期间脚本执行会失败，忽略这类错误继续等待
    async fn settle(&self) {
        sleep(Duration::from_millis(200)).await;
        for _ in 0..SETTLE_ATTEMPTS {
            match self
                .executor
                .eval_as::<String>("document.readyState")
                .await
            {
                Ok(state) if state == "complete" => return,
                Ok(_) => {}
                Err(e) => debug!("等待页面加载: {}", e),
            }
            sleep(Duration::from_millis(200)).await;
        }
        warn!("⚠️ 页面在 {} 次检查后仍未加载完成", SETTLE_ATTEMPTS);
    }

    /// 执行元素操作，找不到元素或脚本异常时重新查找并重试一次
    async fn action_with_retry(&self, script: String, selector: &str) -> AppResult<()> {
        retry_once(selector, || self.executor.eval_as::<bool>(script.as_str())).await?;
        self.settle().await;
        Ok(())
    }
}

/// 执行一次返回 bool 的元素操作，false 表示元素不存在
///
/// 第一次失败（false 或异常，例如导航中执行上下文被销毁）后等待片刻重试一次；
/// 第二次仍为 false 时返回 `ElementNotFound`，第二次异常原样返回
async fn retry_once<F, Fut>(selector: &str, mut attempt: F) -> AppResult<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<bool>>,
{
    match attempt().await {
        Ok(true) => return Ok(()),
        Ok(false) => warn!("⚠️ 未找到元素 {}，重试一次", selector),
        Err(e) => warn!("⚠️ 操作 {} 出错: {}，重试一次", selector, e),
    }
    sleep(CLICK_RETRY_DELAY).await;

    if attempt().await? {
        Ok(())
    } else {
        Err(AppError::element_not_found(selector))
    }
}

impl UiDriver for ChromeDriver {
    async fn goto(&self, url: &str) -> AppResult<()> {
        debug!("导航到: {}", url);
        self.executor
            .page()
            .goto(url)
            .await
            .map_err(|e| BrowserError::NavigationFailed {
                url: url.to_string(),
                source: Box::new(e),
            })?;
        self.settle().await;
        Ok(())
    }

    async fn click(&self, selector: &str) -> AppResult<()> {
        let script = format!(
            r#"(() => {{
                const el = document.querySelector({sel});
                if (!el) return false;
                el.scrollIntoView({{ block: "center" }});
                el.click();
                return true;
            }})()"#,
            sel = js_string(selector)
        );
        self.action_with_retry(script, selector).await
    }

    async fn click_nth(&self, selector: &str, index: usize) -> AppResult<()> {
        let script = format!(
            r#"(() => {{
                const el = document.querySelectorAll({sel})[{index}];
                if (!el) return false;
                el.scrollIntoView({{ block: "center" }});
                el.click();
                return true;
            }})()"#,
            sel = js_string(selector),
            index = index
        );
        self.action_with_retry(script, &format!("{} >> nth={}", selector, index))
            .await
    }

    async fn click_text(&self, text: &str) -> AppResult<()> {
        let script = format!(
            r#"(() => {{
                const wanted = {text};
                const candidates = document.querySelectorAll(
                    "a, button, input[type=button], input[type=submit]"
                );
                for (const el of candidates) {{
                    const label = (el.innerText || el.value || "").trim();
                    if (label === wanted) {{
                        el.scrollIntoView({{ block: "center" }});
                        el.click();
                        return true;
                    }}
                }}
                return false;
            }})()"#,
            text = js_string(text)
        );
        self.action_with_retry(script, &format!("text={}", text)).await
    }

    async fn fill(&self, selector: &str, value: &str) -> AppResult<()> {
        let script = format!(
            r#"(() => {{
                const el = document.querySelector({sel});
                if (!el) return false;
                el.focus();
                el.value = {value};
                for (const type of ["input", "change", "keyup"]) {{
                    el.dispatchEvent(new Event(type, {{ bubbles: true }}));
                }}
                return true;
            }})()"#,
            sel = js_string(selector),
            value = js_string(value)
        );
        self.action_with_retry(script, selector).await
    }

    async fn select_option(&self, selector: &str, value: &str) -> AppResult<()> {
        let script = format!(
            r#"(() => {{
                const el = document.querySelector({sel});
                if (!el) return false;
                const wanted = {value};
                const option = Array.from(el.options).find(
                    o => o.value === wanted || o.text.trim() === wanted
                );
                if (!option) return false;
                el.value = option.value;
                el.dispatchEvent(new Event("change", {{ bubbles: true }}));
                return true;
            }})()"#,
            sel = js_string(selector),
            value = js_string(value)
        );
        self.action_with_retry(script, &format!("{} option={}", selector, value))
            .await
    }

    async fn fill_labelled(&self, label: &str, kind: FieldKind, value: &str) -> AppResult<()> {
        let script = format!(
            r#"(() => {{
                const wanted = {label};
                const kind = {kind};
                const value = {value};
                const labels = Array.from(document.querySelectorAll("label, th, td, span"))
                    .filter(el => el.innerText && el.innerText.trim().replace(/:$/, "") === wanted);
                for (const labelEl of labels) {{
                    let control = labelEl.htmlFor ? document.getElementById(labelEl.htmlFor) : null;
                    if (!control) {{
                        const row = labelEl.closest("tr") || labelEl.parentElement;
                        control = row && row.querySelector("input, select, textarea");
                    }}
                    if (!control) continue;
                    if (kind === "select") {{
                        const option = Array.from(control.options || []).find(
                            o => o.value === value || o.text.trim() === value
                        );
                        if (!option) return false;
                        control.value = option.value;
                    }} else if (kind === "checkbox" || kind === "radio") {{
                        const want = value !== "false" && value !== "No";
                        if (control.checked !== want) control.click();
                        return true;
                    }} else {{
                        control.value = value;
                        control.dispatchEvent(new Event("input", {{ bubbles: true }}));
                    }}
                    control.dispatchEvent(new Event("change", {{ bubbles: true }}));
                    return true;
                }}
                return false;
            }})()"#,
            label = js_string(label),
            kind = js_string(kind.as_str()),
            value = js_string(value)
        );
        self.action_with_retry(script, &format!("label={}", label))
            .await
    }

    async fn read_labelled(&self, label: &str) -> AppResult<String> {
        let script = format!(
            r#"(() => {{
                const wanted = {label};
                const labels = Array.from(document.querySelectorAll("label, th, td, span"))
                    .filter(el => el.innerText && el.innerText.trim().replace(/:$/, "") === wanted);
                for (const labelEl of labels) {{
                    let control = labelEl.htmlFor ? document.getElementById(labelEl.htmlFor) : null;
                    if (!control) {{
                        const row = labelEl.closest("tr") || labelEl.parentElement;
                        control = row && row.querySelector("input, select, textarea");
                    }}
                    if (control) {{
                        const text = control.tagName === "SELECT" && control.selectedIndex >= 0
                            ? control.options[control.selectedIndex].text
                            : control.value;
                        return {{ found: true, text: text || "" }};
                    }}
                    const cell = labelEl.closest("td, th");
                    const next = cell ? cell.nextElementSibling : labelEl.nextElementSibling;
                    if (next) return {{ found: true, text: next.innerText || "" }};
                }}
                return {{ found: false, text: "" }};
            }})()"#,
            label = js_string(label)
        );
        let lookup: TextLookup = self.executor.eval_as(script).await?;
        if lookup.found {
            Ok(lookup.text.trim().to_string())
        } else {
            Err(AppError::element_not_found(format!("label={}", label)))
        }
    }

    async fn text_content(&self, selector: &str) -> AppResult<String> {
        let script = format!(
            r#"(() => {{
                const el = document.querySelector({sel});
                return el ? {{ found: true, text: el.innerText || el.value || "" }}
                          : {{ found: false, text: "" }};
            }})()"#,
            sel = js_string(selector)
        );
        let lookup: TextLookup = self.executor.eval_as(script).await?;
        if lookup.found {
            Ok(lookup.text)
        } else {
            Err(AppError::element_not_found(selector))
        }
    }

    async fn page_text(&self) -> AppResult<String> {
        self.executor
            .eval_as("document.body ? document.body.innerText : \"\"")
            .await
    }

    async fn is_visible(&self, selector: &str) -> AppResult<bool> {
        let script = format!(
            r#"(() => {{
                const el = document.querySelector({sel});
                return !!el && !!(el.offsetWidth || el.offsetHeight || el.getClientRects().length);
            }})()"#,
            sel = js_string(selector)
        );
        self.executor.eval_as(script).await
    }

    async fn count(&self, selector: &str) -> AppResult<usize> {
        let script = format!(
            "document.querySelectorAll({}).length",
            js_string(selector)
        );
        self.executor.eval_as(script).await
    }

    async fn table_rows(&self, table_selector: &str) -> AppResult<Vec<TableRow>> {
        let script = format!(
            r#"(() => {{
                const table = document.querySelector({sel});
                if (!table) return [];
                return Array.from(table.querySelectorAll("tbody tr")).map(tr => {{
                    const link = tr.querySelector("a");
                    const row = {{
                        cells: Array.from(tr.querySelectorAll("td")).map(td => td.innerText.trim())
                    }};
                    if (link) row.link_text = link.innerText.trim();
                    return row;
                }});
            }})()"#,
            sel = js_string(table_selector)
        );
        self.executor.eval_as(script).await
    }

    async fn accept_dialogs(&self) -> AppResult<()> {
        self.executor
            .eval(
                r#"(() => {
                    window.confirm = () => true;
                    window.alert = () => undefined;
                    return true;
                })()"#,
            )
            .await?;
        debug!("已设置自动接受对话框");
        Ok(())
    }

    async fn enable_downloads(&self, dir: &Path) -> AppResult<()> {
        tokio::fs::create_dir_all(dir).await?;
        let dir = tokio::fs::canonicalize(dir).await?;

        let params = SetDownloadBehaviorParams::builder()
            .behavior(SetDownloadBehaviorBehavior::Allow)
            .download_path(dir.to_string_lossy().to_string())
            .build()
            .map_err(|message| BrowserError::ConfigurationFailed { message })?;
        self.executor.page().execute(params).await?;

        info!("📥 下载目录: {}", dir.display());
        Ok(())
    }
}
