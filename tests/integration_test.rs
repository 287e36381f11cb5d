use bcss_ui_driver::browser::connect_to_browser_and_page;
use bcss_ui_driver::config::Config;
use bcss_ui_driver::infrastructure::{ChromeDriver, JsExecutor};
use bcss_ui_driver::models::{load_all_scenarios, UserDirectory};
use bcss_ui_driver::services::{EventStatusLookup, UiEventStatusLookup, UserTools};
use bcss_ui_driver::utils::logging;
use bcss_ui_driver::workflow::InvitationFlow;

#[tokio::test]
#[ignore] // 默认忽略，需要手动运行：cargo test -- --ignored
async fn test_login_and_log_out() {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 连接浏览器
    let (_browser, page) =
        connect_to_browser_and_page(config.browser_debug_port, Some(&config.base_url), None)
            .await
            .expect("连接浏览器失败");
    let driver = ChromeDriver::new(JsExecutor::new(page));

    let users = UserDirectory::load(&config.users_file)
        .await
        .expect("加载用户文件失败");
    let user = users.get("hub_manager").expect("缺少 hub_manager 用户");

    let tools = UserTools::new(&driver, &config.base_url, config.password.as_deref());
    tools.user_login(user).await.expect("登录失败");
    tools.log_out().await.expect("登出失败");
}

#[tokio::test]
#[ignore]
async fn test_generate_invitations_live() {
    logging::init();
    let config = Config::from_env();

    let (_browser, page) =
        connect_to_browser_and_page(config.browser_debug_port, Some(&config.base_url), None)
            .await
            .expect("连接浏览器失败");
    let driver = ChromeDriver::new(JsExecutor::new(page));

    let users = UserDirectory::load(&config.users_file)
        .await
        .expect("加载用户文件失败");
    let tools = UserTools::new(&driver, &config.base_url, config.password.as_deref());
    tools
        .user_login(users.get("hub_manager").expect("缺少 hub_manager 用户"))
        .await
        .expect("登录失败");

    let outcome = InvitationFlow::new(&config)
        .generate(&driver)
        .await
        .expect("生成邀请失败");
    println!("刷新 {} 次，自我转诊: {}", outcome.report.refresh_cycles, outcome.self_referrals);

    tools.log_out().await.expect("登出失败");
}

#[tokio::test]
#[ignore]
async fn test_subject_status_lookup_live() {
    logging::init();
    let config = Config::from_env();
    let nhs_number = std::env::var("TEST_NHS_NUMBER").expect("需要设置 TEST_NHS_NUMBER");

    let (_browser, page) =
        connect_to_browser_and_page(config.browser_debug_port, Some(&config.base_url), None)
            .await
            .expect("连接浏览器失败");
    let driver = ChromeDriver::new(JsExecutor::new(page));

    let status = UiEventStatusLookup::new(&driver)
        .latest_event_status(&nhs_number)
        .await
        .expect("查询事件状态失败");
    assert!(!status.is_empty());
}

#[tokio::test]
async fn test_load_scenarios_from_config_folder() {
    let config = Config::default();
    let scenarios = load_all_scenarios(&config.scenario_folder)
        .await
        .expect("加载场景失败");

    for scenario in &scenarios {
        println!("{} ({} 步)", scenario.name, scenario.steps.len());
    }
}
