//! 内存版 UiDriver，按选择器子串模拟被测系统页面

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use bcss_ui_driver::error::{AppError, AppResult};
use bcss_ui_driver::infrastructure::{FieldKind, TableRow, UiDriver};
use bcss_ui_driver::pages::manage_batch_page::ARCHIVED_MESSAGE;
use bcss_ui_driver::services::EventStatusLookup;

/// 单页信件，内容含 "NHS No: 1234567890"
pub const LETTER_PDF: &[u8] = include_bytes!("../fixtures/nhs_letter.pdf");

/// 当前"页面"，由 click_text 的菜单项决定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Other,
    ActiveList,
    ArchivedList,
    ManageBatch,
}

pub struct FakeDriver {
    view: Cell<View>,
    active_rows: Vec<TableRow>,
    archived_rows: RefCell<Vec<TableRow>>,
    prepare_visible: Cell<bool>,
    retrieve_count: usize,
    confirms_left: Cell<usize>,
    download_dir: RefCell<Option<PathBuf>>,
    csv_rows: Vec<&'static str>,
    pdf_letters: bool,
    statuses: RefCell<VecDeque<&'static str>>,
    planned_total: &'static str,
    event_status: Option<&'static str>,
    self_referrals_total: &'static str,
    pub dialogs_accepted: Cell<bool>,
    pub actions: RefCell<Vec<String>>,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self {
            view: Cell::new(View::Other),
            active_rows: Vec::new(),
            archived_rows: RefCell::new(Vec::new()),
            prepare_visible: Cell::new(true),
            retrieve_count: 1,
            confirms_left: Cell::new(1),
            download_dir: RefCell::new(None),
            csv_rows: vec!["9990001112"],
            pdf_letters: false,
            statuses: RefCell::new(VecDeque::from(["Completed"])),
            planned_total: "12",
            event_status: None,
            self_referrals_total: "1",
            dialogs_accepted: Cell::new(false),
            actions: RefCell::new(Vec::new()),
        }
    }

    /// 活动列表中的一行：批次 ID、事件代码、描述、状态
    pub fn with_batch(mut self, id: &str, code: &str, description: &str, status: &str) -> Self {
        self.active_rows.push(TableRow {
            cells: vec![
                id.to_string(),
                code.to_string(),
                description.to_string(),
                status.to_string(),
            ],
            link_text: Some(id.to_string()),
        });
        self
    }

    pub fn with_documents(mut self, retrieve: usize, confirm: usize) -> Self {
        self.retrieve_count = retrieve;
        self.confirms_left = Cell::new(confirm);
        self
    }

    pub fn with_csv_numbers(mut self, numbers: Vec<&'static str>) -> Self {
        self.csv_rows = numbers;
        self
    }

    /// 取回时下载单页信件 PDF（NHS No: 1234567890）而不是 CSV
    pub fn with_pdf_letters(mut self) -> Self {
        self.pdf_letters = true;
        self
    }

    pub fn already_prepared(self) -> Self {
        self.prepare_visible.set(false);
        self
    }

    pub fn with_statuses(self, statuses: &[&'static str]) -> Self {
        *self.statuses.borrow_mut() = statuses.iter().copied().collect();
        self
    }

    pub fn with_totals(mut self, planned: &'static str, self_referrals: &'static str) -> Self {
        self.planned_total = planned;
        self.self_referrals_total = self_referrals;
        self
    }

    /// 受试者摘要页上的最新事件状态
    pub fn with_event_status(mut self, status: &'static str) -> Self {
        self.event_status = Some(status);
        self
    }

    pub fn did(&self, action: &str) -> bool {
        self.actions.borrow().iter().any(|a| a == action)
    }

    fn record(&self, action: impl Into<String>) {
        self.actions.borrow_mut().push(action.into());
    }

    fn write_download(&self, index: usize) -> AppResult<()> {
        let dir = self
            .download_dir
            .borrow()
            .clone()
            .ok_or_else(|| AppError::Other("downloads not enabled".to_string()))?;
        if self.pdf_letters {
            std::fs::write(dir.join(format!("letters_{}.pdf", index)), LETTER_PDF)?;
            return Ok(());
        }
        let mut content = String::from("Surname,NHS Number\n");
        for number in &self.csv_rows {
            content.push_str(&format!("Subject,{}\n", number));
        }
        std::fs::write(dir.join(format!("letters_{}.csv", index)), content)?;
        Ok(())
    }
}

impl UiDriver for FakeDriver {
    async fn goto(&self, url: &str) -> AppResult<()> {
        self.record(format!("goto {}", url));
        self.view.set(View::Other);
        Ok(())
    }

    async fn click(&self, selector: &str) -> AppResult<()> {
        self.record(format!("click {}", selector));
        if selector.contains("Prepare Batch") {
            self.prepare_visible.set(false);
        }
        Ok(())
    }

    async fn click_nth(&self, selector: &str, index: usize) -> AppResult<()> {
        self.record(format!("click_nth {} {}", selector, index));
        if selector.contains("Retrieve") {
            if index >= self.retrieve_count {
                return Err(AppError::element_not_found(selector));
            }
            self.write_download(index)?;
        } else if selector.contains("Confirm Printed") {
            let left = self.confirms_left.get();
            if left == 0 {
                return Err(AppError::element_not_found(selector));
            }
            self.confirms_left.set(left - 1);
        }
        Ok(())
    }

    async fn click_text(&self, text: &str) -> AppResult<()> {
        self.record(format!("click_text {}", text));
        match text {
            "Active Batch List" => self.view.set(View::ActiveList),
            "Archived Batch List" => self.view.set(View::ArchivedList),
            "Main Menu" | "Communications Production" => {}
            _ => {
                if self.active_rows.iter().any(|r| r.link_text.as_deref() == Some(text)) {
                    self.view.set(View::ManageBatch);
                    let mut archived = self.archived_rows.borrow_mut();
                    if !archived.iter().any(|r| r.link_text.as_deref() == Some(text)) {
                        archived.push(TableRow {
                            cells: vec![text.to_string(), "Archived".to_string()],
                            link_text: Some(text.to_string()),
                        });
                    }
                } else {
                    self.view.set(View::Other);
                }
            }
        }
        Ok(())
    }

    async fn fill(&self, selector: &str, value: &str) -> AppResult<()> {
        self.record(format!("fill {} {}", selector, value));
        Ok(())
    }

    async fn select_option(&self, selector: &str, value: &str) -> AppResult<()> {
        self.record(format!("select {} {}", selector, value));
        Ok(())
    }

    async fn fill_labelled(&self, label: &str, kind: FieldKind, value: &str) -> AppResult<()> {
        self.record(format!("{} {} {}", kind.as_str(), label, value));
        Ok(())
    }

    async fn read_labelled(&self, label: &str) -> AppResult<String> {
        match label {
            "Latest Event Status" => self
                .event_status
                .map(str::to_string)
                .ok_or_else(|| AppError::element_not_found(format!("label={}", label))),
            _ => Err(AppError::element_not_found(format!("label={}", label))),
        }
    }

    async fn text_content(&self, selector: &str) -> AppResult<String> {
        match selector {
            "#displayRS" => {
                let mut statuses = self.statuses.borrow_mut();
                let status = if statuses.len() > 1 {
                    statuses.pop_front()
                } else {
                    statuses.front().copied()
                };
                Ok(status.unwrap_or("Completed").to_string())
            }
            "#col8_total" => Ok(self.planned_total.to_string()),
            "#col9_total" => Ok(self.self_referrals_total.to_string()),
            _ => Err(AppError::element_not_found(selector)),
        }
    }

    async fn page_text(&self) -> AppResult<String> {
        if self.view.get() == View::ManageBatch && self.confirms_left.get() == 0 {
            Ok(format!("Manage Active Batch\n{}", ARCHIVED_MESSAGE))
        } else {
            Ok("Manage Active Batch".to_string())
        }
    }

    async fn is_visible(&self, selector: &str) -> AppResult<bool> {
        if selector.contains("Prepare Batch") {
            return Ok(self.prepare_visible.get());
        }
        if selector.contains("Retrieve") {
            return Ok(!self.prepare_visible.get());
        }
        // 角色选择页不出现
        Ok(false)
    }

    async fn count(&self, selector: &str) -> AppResult<usize> {
        if selector.contains("Retrieve") {
            Ok(self.retrieve_count)
        } else if selector.contains("Confirm Printed") {
            Ok(self.confirms_left.get())
        } else {
            Ok(0)
        }
    }

    async fn table_rows(&self, _table_selector: &str) -> AppResult<Vec<TableRow>> {
        match self.view.get() {
            View::ActiveList => Ok(self.active_rows.clone()),
            View::ArchivedList => Ok(self.archived_rows.borrow().clone()),
            _ => Ok(Vec::new()),
        }
    }

    async fn accept_dialogs(&self) -> AppResult<()> {
        self.dialogs_accepted.set(true);
        Ok(())
    }

    async fn enable_downloads(&self, dir: &Path) -> AppResult<()> {
        std::fs::create_dir_all(dir)?;
        *self.download_dir.borrow_mut() = Some(dir.to_path_buf());
        Ok(())
    }
}

/// 固定返回同一状态，并记录被查询的号码
pub struct FixedStatus {
    status: &'static str,
    pub queried: RefCell<Vec<String>>,
}

impl FixedStatus {
    pub fn new(status: &'static str) -> Self {
        Self {
            status,
            queried: RefCell::new(Vec::new()),
        }
    }
}

impl EventStatusLookup for FixedStatus {
    async fn latest_event_status(&self, nhs_number: &str) -> AppResult<String> {
        self.queried.borrow_mut().push(nhs_number.to_string());
        Ok(self.status.to_string())
    }
}
