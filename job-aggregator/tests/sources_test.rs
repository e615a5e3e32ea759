use job_aggregator::sources::{ArbeitnowSource, HimalayasSource, RemoteOkSource, WeWorkRemotelySource};
use job_aggregator::{FetchConfig, Fetcher, JobSource};
use mockito::{Matcher, Server};
use std::sync::Once;
use tracing::info;

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .try_init()
            .ok();
    });
}

fn fetcher() -> Fetcher {
    Fetcher::new(FetchConfig::default()).unwrap()
}

const REMOTEOK_PAGE: &str = r#"
<html><body><table id="jobsboard">
  <tr class="job" data-url="/remote-jobs/101-ml-engineer">
    <td class="company_and_position">
      <h2 itemprop="title">ML Engineer</h2>
      <h3 itemprop="name">Acme AI</h3>
    </td>
  </tr>
  <tr class="job">
    <td class="company_and_position">
      <a class="preventLink" href="https://jobs.example.org/llm">
        <h2>LLM Researcher</h2>
      </a>
    </td>
  </tr>
  <tr class="job" data-url="/remote-jobs/103"><td><h2>AI</h2></td></tr>
</table></body></html>
"#;

#[tokio::test]
async fn remoteok_rows_become_records_with_absolute_links() {
    init_tracing();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/remote-ai-jobs")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(REMOTEOK_PAGE)
        .create_async()
        .await;

    let source = RemoteOkSource::with_base_url(&server.url()).unwrap();
    let records = source.extract(&fetcher(), 25).await;

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title, "ML Engineer");
    assert_eq!(records[0].company, "Acme AI");
    assert_eq!(records[0].link, format!("{}/remote-jobs/101-ml-engineer", server.url()));
    assert_eq!(records[1].company, "N/A");
    assert_eq!(records[1].link, "https://jobs.example.org/llm");
    for record in &records {
        assert!(!record.title.is_empty() && !record.link.is_empty());
        assert_eq!(record.source, "RemoteOK");
        assert_eq!(record.location, "Remote");
    }

    mock.assert_async().await;
    info!("RemoteOK extraction test completed");
}

#[tokio::test]
async fn server_error_yields_no_records() {
    init_tracing();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/jobs/ai-ml")
        .with_status(500)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let source = HimalayasSource::with_base_url(&server.url()).unwrap();
    assert!(source.extract(&fetcher(), 25).await.is_empty());

    mock.assert_async().await;
}

#[tokio::test]
async fn unreachable_source_yields_no_records() {
    init_tracing();
    // Nothing listens on port 9 of localhost.
    let source = RemoteOkSource::with_base_url("http://127.0.0.1:9").unwrap();
    assert!(source.extract(&fetcher(), 25).await.is_empty());
}

#[tokio::test]
async fn weworkremotely_search_page_is_parsed() {
    init_tracing();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Regex(r"^/remote-jobs/search".to_string()))
        .with_status(200)
        .with_body(
            r#"<html><body><ul>
                 <li class="feature"><a href="/remote-jobs/deep-learning-lead">
                   <span class="company">Gradient</span>
                   <span class="title">Deep Learning Lead</span>
                   <span class="region">Anywhere in the World</span>
                 </a></li>
               </ul></body></html>"#,
        )
        .create_async()
        .await;

    let source = WeWorkRemotelySource::with_base_url(&server.url()).unwrap();
    let records = source.extract(&fetcher(), 20).await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].location, "Anywhere in the World");
    assert_eq!(records[0].link, format!("{}/remote-jobs/deep-learning-lead", server.url()));
    mock.assert_async().await;
}

#[tokio::test]
async fn arbeitnow_filters_by_relevance_and_caps_output() {
    init_tracing();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/job-board-api")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"data": [
                {"title": "Machine Learning Engineer", "company_name": "Kiez", "location": "Berlin",
                 "url": "https://www.arbeitnow.com/jobs/kiez/mle", "tags": [], "description": ""},
                {"title": "Office Manager", "company_name": "Kiez", "location": "Berlin",
                 "url": "https://www.arbeitnow.com/jobs/kiez/om", "tags": ["admin"], "description": "paperwork"},
                {"title": "Backend Developer", "company_name": "Datenwerk", "location": "",
                 "url": "https://www.arbeitnow.com/jobs/dw/be", "tags": ["TensorFlow"], "description": ""},
                {"title": "Data Scientist", "company_name": "Nord", "location": "Hamburg",
                 "url": "https://www.arbeitnow.com/jobs/nord/ds", "tags": [], "description": ""}
            ]}"#,
        )
        .create_async()
        .await;

    let source = ArbeitnowSource::with_base_url(&server.url());
    let records = source.extract(&fetcher(), 2).await;

    let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Machine Learning Engineer", "Backend Developer"]);
    assert_eq!(records[1].location, "Remote");
    mock.assert_async().await;
}

#[tokio::test]
async fn arbeitnow_non_json_body_yields_no_records() {
    init_tracing();
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/job-board-api")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let source = ArbeitnowSource::with_base_url(&server.url());
    assert!(source.extract(&fetcher(), 20).await.is_empty());
}
