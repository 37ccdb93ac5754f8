//! Dashboard view models and HTML rendering
//!
//! Every request rebuilds a [`DashboardView`] from the submitted inputs and
//! renders it with [`render_dashboard`]. Rendering is a pure function of the
//! view; nothing is remembered between requests.

use serde::Deserialize;
use shared::{
    round_dp, DerivedFeatures, FarmObservation, FeatureImportance, InputConstraint, InputField,
    ModelPerformance, PredictionResult, INPUT_CONSTRAINTS, MODEL_PERFORMANCE,
};

use super::prediction::PredictionService;

pub const PAGE_TITLE: &str = "Poultry Egg Production Predictor";
pub const DASHBOARD_HEADING: &str = "Poultry Egg Production Prediction Dashboard";
pub const CHART_TITLE: &str = "Random Forest Feature Contributions";
pub const CHART_X_LABEL: &str = "Feature Importance";

/// Inputs 0..4 go in the left column, the rest on the right
const LEFT_COLUMN_INPUTS: usize = 4;

/// Decimal places of the float widgets (`step="0.01"`)
const FORM_DP: u32 = 2;

// ============================================================================
// Input Collection
// ============================================================================

/// Raw form fields as submitted by the browser
#[derive(Debug, Default, Deserialize)]
pub struct DashboardForm {
    pub amount_of_chicken: Option<String>,
    pub amount_of_feeding: Option<String>,
    pub ammonia: Option<String>,
    pub temperature: Option<String>,
    pub humidity: Option<String>,
    pub light_intensity: Option<String>,
    pub noise: Option<String>,
    pub tab: Option<String>,
}

impl DashboardForm {
    fn raw(&self, field: InputField) -> Option<&str> {
        let value = match field {
            InputField::AmountOfChicken => &self.amount_of_chicken,
            InputField::AmountOfFeeding => &self.amount_of_feeding,
            InputField::Ammonia => &self.ammonia,
            InputField::Temperature => &self.temperature,
            InputField::Humidity => &self.humidity,
            InputField::LightIntensity => &self.light_intensity,
            InputField::Noise => &self.noise,
        };
        value.as_deref()
    }

    /// Collect an observation the way the number widgets would.
    ///
    /// Missing or unparsable fields take their default; everything else is
    /// rounded to the widget step and clamped into the widget bounds, so the
    /// echoed value is exactly the one the derived features are built from.
    pub fn observation(&self) -> FarmObservation {
        let mut obs = FarmObservation::default();
        for constraint in &INPUT_CONSTRAINTS {
            let parsed = self
                .raw(constraint.field)
                .and_then(|s| s.trim().parse::<f64>().ok());
            if let Some(value) = parsed {
                let value = if constraint.integer {
                    value
                } else {
                    round_dp(value, FORM_DP)
                };
                obs.set_clamped(constraint.field, value);
            }
        }
        obs
    }

    pub fn tab(&self) -> Tab {
        self.tab.as_deref().and_then(Tab::from_key).unwrap_or_default()
    }
}

// ============================================================================
// View Models
// ============================================================================

/// The three dashboard views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Prediction,
    Performance,
    Importance,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Prediction, Tab::Performance, Tab::Importance];

    pub fn key(&self) -> &'static str {
        match self {
            Tab::Prediction => "prediction",
            Tab::Performance => "performance",
            Tab::Importance => "importance",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Tab::ALL.into_iter().find(|tab| tab.key() == key)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Prediction => "🔢 Prediction",
            Tab::Performance => "📊 Model Performance",
            Tab::Importance => "🌿 Feature Importance",
        }
    }
}

#[derive(Debug, Clone)]
pub struct InputView {
    pub constraint: &'static InputConstraint,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct PredictionPanel {
    pub inputs: Vec<InputView>,
    pub derived: DerivedFeatures,
    /// Present only after the predict button was pressed
    pub result: Option<PredictionResult>,
}

#[derive(Debug, Clone)]
pub struct PerformancePanel {
    pub performance: ModelPerformance,
}

#[derive(Debug, Clone)]
pub enum ImportancePanel {
    /// Importances in ascending order
    Chart(Vec<FeatureImportance>),
    /// The model's importances could not be paired with the feature names
    Unavailable(String),
}

#[derive(Debug, Clone)]
pub struct DashboardView {
    pub active_tab: Tab,
    pub prediction: PredictionPanel,
    pub performance: PerformancePanel,
    pub importance: ImportancePanel,
}

impl DashboardView {
    pub fn build(
        service: &PredictionService,
        obs: &FarmObservation,
        result: Option<PredictionResult>,
        active_tab: Tab,
    ) -> Self {
        let inputs = INPUT_CONSTRAINTS
            .iter()
            .map(|constraint| InputView {
                constraint,
                value: obs.get(constraint.field),
            })
            .collect();

        let importance = match service.feature_importance() {
            Ok(ranked) => ImportancePanel::Chart(ranked),
            Err(e) => {
                tracing::error!("Feature importance unavailable: {}", e);
                ImportancePanel::Unavailable(e.to_string())
            }
        };

        Self {
            active_tab,
            prediction: PredictionPanel {
                inputs,
                derived: service.derive(obs),
                result,
            },
            performance: PerformancePanel {
                performance: MODEL_PERFORMANCE,
            },
            importance,
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Render the whole page for a view
pub fn render_dashboard(view: &DashboardView) -> String {
    let tabs = Tab::ALL
        .iter()
        .map(|tab| {
            format!(
                r#"<input type="radio" name="tab-switch" id="tab-{key}" {checked}><label for="tab-{key}">{title}</label>"#,
                key = tab.key(),
                title = tab.title(),
                checked = if *tab == view.active_tab { "checked" } else { "" },
            )
        })
        .collect::<String>();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{page_title}</title>
<style>{css}</style>
</head>
<body>
<main>
<h1>🐔 {heading}</h1>
<p>Use this AI-powered tool to predict daily egg production in poultry farms based on feeding and environmental data.</p>
<div class="tabs">
{tabs}
<section class="panel" id="panel-prediction">{prediction}</section>
<section class="panel" id="panel-performance">{performance}</section>
<section class="panel" id="panel-importance">{importance}</section>
</div>
<hr>
<footer>Developed with ❤️ using Random Forest Regression</footer>
</main>
<script type="module">{script}</script>
</body>
</html>"#,
        page_title = PAGE_TITLE,
        heading = DASHBOARD_HEADING,
        css = CSS,
        script = LIVE_DERIVED_SCRIPT,
        tabs = tabs,
        prediction = render_prediction_panel(&view.prediction),
        performance = render_performance_panel(&view.performance),
        importance = render_importance_panel(&view.importance),
    )
}

fn render_input(input: &InputView) -> String {
    let c = input.constraint;
    let (step, value) = if c.integer {
        ("1".to_string(), format!("{:.0}", input.value))
    } else {
        ("0.01".to_string(), format!("{:.*}", FORM_DP as usize, input.value))
    };
    format!(
        r#"<label>{label}<input type="number" name="{name}" min="{min}" max="{max}" step="{step}" value="{value}" required></label>"#,
        label = html_escape(c.label),
        name = c.field.key(),
        min = c.min,
        max = c.max,
        step = step,
        value = value,
    )
}

fn render_prediction_panel(panel: &PredictionPanel) -> String {
    let split = LEFT_COLUMN_INPUTS.min(panel.inputs.len());
    let (left, right) = panel.inputs.split_at(split);
    let column = |inputs: &[InputView]| inputs.iter().map(render_input).collect::<String>();

    let result_html = panel
        .result
        .map(|result| {
            let class = match result.confidence {
                shared::Confidence::High => "info",
                shared::Confidence::Lower => "warning",
            };
            format!(
                r#"<div class="success">{headline}</div><div class="{class}">{message}</div>"#,
                headline = html_escape(&result.headline()),
                class = class,
                message = html_escape(result.confidence.message()),
            )
        })
        .unwrap_or_default();

    format!(
        r#"<h2>Enter Farm Data</h2>
<form id="farm-data" method="post" action="/">
<input type="hidden" name="tab" value="prediction">
<div class="columns"><div>{left}</div><div>{right}</div></div>
<h3>🧩 Derived Features</h3>
<p><strong>Feed per Chicken:</strong> <span id="feed-per-chicken">{feed_per_chicken}</span></p>
<p><strong>Environmental Stress Index:</strong> <span id="stress-index">{stress_index}</span></p>
<button type="submit" formmethod="get">Update Derived Features</button>
<button type="submit" class="primary">Predict Egg Production 🥚</button>
</form>
{result}"#,
        left = column(left),
        right = column(right),
        feed_per_chicken = panel.derived.feed_per_chicken_display(),
        stress_index = panel.derived.environmental_stress_index_display(),
        result = result_html,
    )
}

fn render_performance_panel(panel: &PerformancePanel) -> String {
    let p = &panel.performance;
    let bullets = p
        .interpretation()
        .iter()
        .map(|line| format!("<li>{}</li>", html_escape(line)))
        .collect::<String>();

    format!(
        r#"<h2>Model Evaluation Summary</h2>
<div class="metrics">
<div class="metric"><span>R² Score</span><strong>{r2:.3}</strong></div>
<div class="metric"><span>MAE</span><strong>{mae:.2}</strong></div>
<div class="metric"><span>RMSE</span><strong>{rmse:.2}</strong></div>
</div>
<p><strong>Interpretation:</strong></p>
<ul>{bullets}</ul>"#,
        r2 = p.r2_score,
        mae = p.mae,
        rmse = p.rmse,
        bullets = bullets,
    )
}

fn render_importance_panel(panel: &ImportancePanel) -> String {
    let body = match panel {
        ImportancePanel::Chart(ranked) => render_importance_chart(ranked),
        ImportancePanel::Unavailable(reason) => format!(
            r#"<div class="error">Feature importance unavailable: {}</div>"#,
            html_escape(reason)
        ),
    };
    format!("<h2>Feature Importance Analysis</h2>\n{}", body)
}

/// Horizontal bar chart as inline SVG.
///
/// `ranked` is ascending, so it is drawn bottom-up and the largest bar ends
/// up on top.
pub fn render_importance_chart(ranked: &[FeatureImportance]) -> String {
    const WIDTH: f64 = 760.0;
    const LABEL_WIDTH: f64 = 220.0;
    const BAR_AREA: f64 = 440.0;
    const ROW_HEIGHT: f64 = 30.0;
    const TOP: f64 = 40.0;

    let max = ranked
        .iter()
        .map(|f| f.importance)
        .fold(0.0_f64, f64::max);
    let scale = if max > 0.0 { BAR_AREA / max } else { 0.0 };
    let height = TOP + ROW_HEIGHT * ranked.len() as f64 + 50.0;

    let rows = ranked
        .iter()
        .rev()
        .enumerate()
        .map(|(row, item)| {
            let y = TOP + ROW_HEIGHT * row as f64;
            let bar = item.importance * scale;
            format!(
                r#"<text x="{lx}" y="{ty}" text-anchor="end">{name}</text><rect x="{bx}" y="{y}" width="{bar:.1}" height="{bh}" class="bar"><title>{name}: {value:.4}</title></rect><text x="{vx:.1}" y="{ty}">{value:.3}</text>"#,
                lx = LABEL_WIDTH - 8.0,
                ty = y + ROW_HEIGHT * 0.6,
                name = item.feature.as_str(),
                bx = LABEL_WIDTH,
                y = y + 4.0,
                bar = bar,
                bh = ROW_HEIGHT - 8.0,
                value = item.importance,
                vx = LABEL_WIDTH + bar + 6.0,
            )
        })
        .collect::<String>();

    format!(
        r#"<svg class="chart" viewBox="0 0 {w} {h}" width="{w}" height="{h}" role="img" aria-label="{title}"><text x="{cx}" y="22" text-anchor="middle" class="chart-title">{title}</text>{rows}<line x1="{lw}" y1="{top}" x2="{lw}" y2="{axis}" class="axis"/><text x="{ax}" y="{xl}" text-anchor="middle">{xlabel}</text></svg>"#,
        w = WIDTH,
        h = height,
        cx = WIDTH / 2.0,
        title = CHART_TITLE,
        rows = rows,
        lw = LABEL_WIDTH,
        top = TOP,
        axis = height - 50.0,
        ax = LABEL_WIDTH + BAR_AREA / 2.0,
        xl = height - 18.0,
        xlabel = CHART_X_LABEL,
    )
}

/// Escape text for HTML element and attribute content
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Recompute derived features on every input change.
///
/// Uses the wasm bindings under `/pkg` when they were built, otherwise the
/// derived-features endpoint. Out-of-range values leave the last shown
/// numbers in place until they are valid again.
const LIVE_DERIVED_SCRIPT: &str = r#"
const form = document.getElementById('farm-data');
const feedPerChicken = document.getElementById('feed-per-chicken');
const stressIndex = document.getElementById('stress-index');
let wasm = null;
import('/pkg/egg_predictor_wasm.js')
  .then(async (module) => { await module.default(); wasm = module; })
  .catch(() => {});

function observation() {
  const obs = {};
  for (const input of form.querySelectorAll('input[type=number]')) {
    const value = Number(input.value);
    obs[input.name] = input.name === 'amount_of_chicken' ? Math.round(value) : value;
  }
  return obs;
}

function show(derived) {
  feedPerChicken.textContent = derived.feed_per_chicken.toFixed(5);
  stressIndex.textContent = derived.environmental_stress_index.toFixed(3);
}

async function refresh() {
  if (!form.checkValidity()) return;
  const body = JSON.stringify(observation());
  if (wasm) {
    show(JSON.parse(wasm.derive_features(body)));
    return;
  }
  const resp = await fetch('/api/v1/derived-features', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body,
  });
  if (resp.ok) show(await resp.json());
}

form.addEventListener('input', () => { refresh().catch(() => {}); });
"#;

const CSS: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #fafafa; color: #262730; }
main { max-width: 1100px; margin: 0 auto; padding: 2rem; }
.tabs > input { display: none; }
.tabs > label { display: inline-block; padding: .6rem 1rem; cursor: pointer; border-bottom: 2px solid transparent; }
.tabs > input:checked + label { border-bottom-color: #ff4b4b; font-weight: 600; }
.panel { display: none; padding-top: 1rem; }
#tab-prediction:checked ~ #panel-prediction,
#tab-performance:checked ~ #panel-performance,
#tab-importance:checked ~ #panel-importance { display: block; }
.columns { display: grid; grid-template-columns: 1fr 1fr; gap: 2rem; }
.columns label { display: block; margin-bottom: .8rem; }
.columns input { display: block; width: 100%; padding: .4rem; }
button { padding: .5rem 1rem; margin-right: .5rem; }
button.primary { background: #ff4b4b; color: #fff; border: none; border-radius: 4px; }
.success, .info, .warning, .error { padding: .8rem 1rem; border-radius: 4px; margin-top: 1rem; }
.success { background: #d4edda; }
.info { background: #d1ecf1; }
.warning { background: #fff3cd; }
.error { background: #f8d7da; }
.metrics { display: grid; grid-template-columns: repeat(3, 1fr); gap: 1rem; }
.metric span { display: block; font-size: .9rem; color: #555; }
.metric strong { font-size: 2rem; }
.chart .bar { fill: #1f77b4; }
.chart .axis { stroke: #333; }
.chart text { font-size: 12px; }
.chart .chart-title { font-size: 15px; font-weight: 600; }
footer { color: #777; font-size: .85rem; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::test_predictor;
    use shared::{Confidence, FeatureName};

    fn form(pairs: &[(&str, &str)]) -> DashboardForm {
        let mut form = DashboardForm::default();
        for (key, value) in pairs {
            let slot = match *key {
                "amount_of_chicken" => &mut form.amount_of_chicken,
                "amount_of_feeding" => &mut form.amount_of_feeding,
                "temperature" => &mut form.temperature,
                "ammonia" => &mut form.ammonia,
                "noise" => &mut form.noise,
                "tab" => &mut form.tab,
                other => panic!("unused key {}", other),
            };
            *slot = Some(value.to_string());
        }
        form
    }

    #[test]
    fn test_empty_form_uses_defaults() {
        let form = DashboardForm::default();
        assert_eq!(form.observation(), FarmObservation::default());
        assert_eq!(form.tab(), Tab::Prediction);
    }

    #[test]
    fn test_form_clamps_and_ignores_garbage() {
        let form = form(&[
            ("amount_of_chicken", "20"),
            ("temperature", "41.5"),
            ("noise", "loud"),
            ("amount_of_feeding", " 190.5 "),
        ]);
        let obs = form.observation();
        assert_eq!(obs.amount_of_chicken, 100);
        assert_eq!(obs.temperature, 40.0);
        assert_eq!(obs.noise, 200.0);
        assert_eq!(obs.amount_of_feeding, 190.5);
    }

    #[test]
    fn test_form_rounds_to_widget_step() {
        let obs = form(&[("ammonia", "15.006"), ("temperature", "30.004")]).observation();
        assert_eq!(obs.ammonia, 15.01);
        assert_eq!(obs.temperature, 30.0);

        let service = PredictionService::new(test_predictor());
        let view = DashboardView::build(&service, &obs, None, Tab::Prediction);
        let html = render_dashboard(&view);
        // 30 * 50 * 15.01, computed from the value shown in the box
        assert!(html.contains(r#"name="ammonia" min="5" max="25" step="0.01" value="15.01""#));
        assert!(html.contains(r#"<span id="stress-index">22515.000</span>"#));
    }

    #[test]
    fn test_page_recomputes_derived_features_on_input() {
        let service = PredictionService::new(test_predictor());
        let view = DashboardView::build(&service, &FarmObservation::default(), None, Tab::Prediction);
        let html = render_dashboard(&view);

        assert!(html.contains(r#"<form id="farm-data""#));
        assert!(html.contains(r#"<script type="module">"#));
        assert!(html.contains("form.addEventListener('input'"));
        assert!(html.contains("import('/pkg/egg_predictor_wasm.js')"));
        assert!(html.contains("wasm.derive_features(body)"));
        assert!(html.contains("fetch('/api/v1/derived-features'"));
    }

    #[test]
    fn test_tab_selection() {
        assert_eq!(form(&[("tab", "importance")]).tab(), Tab::Importance);
        assert_eq!(form(&[("tab", "nope")]).tab(), Tab::Prediction);
    }

    #[test]
    fn test_render_without_prediction() {
        let service = PredictionService::new(test_predictor());
        let view = DashboardView::build(&service, &FarmObservation::default(), None, Tab::Prediction);
        let html = render_dashboard(&view);

        assert!(html.contains(DASHBOARD_HEADING));
        assert!(html.contains(r#"<span id="feed-per-chicken">0.06667</span>"#));
        assert!(html.contains(r#"<span id="stress-index">22500.000</span>"#));
        assert!(!html.contains("Estimated Egg Production"));
        assert!(html.contains(r#"id="tab-prediction" checked"#));
    }

    #[test]
    fn test_render_with_prediction_and_warning() {
        let service = PredictionService::new(test_predictor());
        let result = PredictionResult {
            eggs_per_day: 2211.7,
            confidence: Confidence::Lower,
        };
        let view = DashboardView::build(
            &service,
            &FarmObservation::default(),
            Some(result),
            Tab::Prediction,
        );
        let html = render_dashboard(&view);

        assert!(html.contains("Estimated Egg Production: 2212 eggs/day"));
        assert!(html.contains("Prediction confidence may be lower."));
        assert!(html.contains(&html_escape("model's optimal training range")));
    }

    #[test]
    fn test_render_performance_metrics() {
        let service = PredictionService::new(test_predictor());
        let view = DashboardView::build(&service, &FarmObservation::default(), None, Tab::Performance);
        let html = render_dashboard(&view);

        assert!(html.contains("<strong>0.974</strong>"));
        assert!(html.contains("<strong>19.71</strong>"));
        assert!(html.contains("<strong>33.86</strong>"));
        assert!(html.contains("97.4% of the variance"));
        assert!(html.contains(r#"id="tab-performance" checked"#));
    }

    #[test]
    fn test_chart_draws_largest_bar_first() {
        let ranked = vec![
            FeatureImportance {
                feature: FeatureName::Noise,
                importance: 0.1,
            },
            FeatureImportance {
                feature: FeatureName::AmountOfChicken,
                importance: 0.9,
            },
        ];
        let svg = render_importance_chart(&ranked);
        let chicken = svg.find(">amount_of_chicken<").unwrap();
        let noise = svg.find(">noise<").unwrap();
        assert!(chicken < noise);
        assert!(svg.contains(CHART_TITLE));
        assert!(svg.contains(CHART_X_LABEL));
        assert!(svg.contains(r#"width="440.0""#));
    }

    #[test]
    fn test_unavailable_importance_renders_notice() {
        let html = render_importance_panel(&ImportancePanel::Unavailable("bad <len>".into()));
        assert!(html.contains("Feature importance unavailable: bad &lt;len&gt;"));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    }
}
