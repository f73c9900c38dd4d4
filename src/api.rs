use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::estimator::StressEstimator;
use crate::insights::InsightsBuilder;
use crate::interpretation::{interpret, EstimateView, Locale};
use crate::model::{InputField, StressInputs, StressLevel};

#[derive(Deserialize, Default)]
pub struct LocaleQuery {
    #[serde(default)]
    pub locale: Locale,
}

/// Partial update of the held slider values.
#[derive(Deserialize, Default, Debug)]
pub struct InputsPatch {
    pub study_hours: Option<f64>,
    pub sleep_hours: Option<f64>,
    pub gpa: Option<f64>,
    pub physical_activity: Option<f64>,
    pub social_activity: Option<f64>,
}

impl InputsPatch {
    fn entries(&self) -> Vec<(InputField, f64)> {
        [
            (InputField::StudyHours, self.study_hours),
            (InputField::SleepHours, self.sleep_hours),
            (InputField::Gpa, self.gpa),
            (InputField::PhysicalActivity, self.physical_activity),
            (InputField::SocialActivity, self.social_activity),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }
}

#[derive(Serialize)]
pub struct InputsResponse {
    pub inputs: StressInputs,
    pub changed: Vec<InputField>,
}

// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().body("Student Stress Estimator is running!")
}

async fn get_inputs(estimator: web::Data<StressEstimator>) -> HttpResponse {
    HttpResponse::Ok().json(estimator.inputs())
}

async fn patch_inputs(
    estimator: web::Data<StressEstimator>,
    patch: web::Json<InputsPatch>,
) -> Result<HttpResponse> {
    let changed = estimator.set_inputs(&patch.entries())?;
    debug!(?changed, "inputs updated");

    Ok(HttpResponse::Ok().json(InputsResponse {
        inputs: estimator.inputs(),
        changed,
    }))
}

// Prediction endpoint; an empty body estimates over the held inputs
async fn request_estimate(
    estimator: web::Data<StressEstimator>,
    query: web::Query<LocaleQuery>,
    body: web::Bytes,
) -> Result<HttpResponse> {
    let pending = if body.iter().all(u8::is_ascii_whitespace) {
        estimator.request_current()?
    } else {
        let inputs: StressInputs = serde_json::from_slice(&body)?;
        estimator.request_estimate(inputs)?
    };

    let estimate = pending.await?;
    Ok(HttpResponse::Ok().json(EstimateView::new(estimate, query.locale)))
}

async fn get_state(estimator: web::Data<StressEstimator>) -> HttpResponse {
    HttpResponse::Ok().json(estimator.state())
}

async fn get_insights() -> HttpResponse {
    HttpResponse::Ok().json(InsightsBuilder::new().build())
}

async fn get_interpretation(
    level: web::Path<String>,
    query: web::Query<LocaleQuery>,
) -> Result<HttpResponse> {
    let level: StressLevel = level.parse()?;
    Ok(HttpResponse::Ok().json(interpret(level, query.locale)))
}

async fn serve_homepage() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html")
        .body(HOMEPAGE)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(serve_homepage))
        .route("/health", web::get().to(health_check))
        .route("/inputs", web::get().to(get_inputs))
        .route("/inputs", web::patch().to(patch_inputs))
        .route("/estimate", web::post().to(request_estimate))
        .route("/estimate/state", web::get().to(get_state))
        .route("/insights", web::get().to(get_insights))
        .route("/interpretation/{level}", web::get().to(get_interpretation));
}

const HOMEPAGE: &str = r#"
    <!DOCTYPE html>
    <html>
    <head>
        <title>Student Stress Estimator</title>
        <style>
            body { font-family: Arial, sans-serif; max-width: 800px; margin: 50px auto; padding: 20px; }
            .container { background: #f5f5f5; padding: 25px; border-radius: 10px; }
            .form-group { margin: 15px 0; }
            label { display: block; margin-bottom: 5px; font-weight: bold; }
            input[type=range] { width: 100%; }
            .bounds { display: flex; justify-content: space-between; font-size: 12px; color: #666; }
            button { background: #007bff; color: white; padding: 12px 24px; border: none; border-radius: 4px; cursor: pointer; margin: 5px; }
            button:disabled { background: #8fb8e6; cursor: wait; }
            .result { margin-top: 20px; padding: 20px; border-radius: 5px; display: none; }
            .success { background: #d4edda; color: #155724; border: 1px solid #c3e6cb; }
            .warning { background: #fff3cd; color: #856404; border: 1px solid #ffeaa7; }
            .danger { background: #f8d7da; color: #721c24; border: 1px solid #f5c6cb; }
            .info { background: #d1ecf1; color: #0c5460; border: 1px solid #bee5eb; }
        </style>
    </head>
    <body>
        <div class="container">
            <h1>How stressed are you? Check your predicted stress level</h1>
            <p>Move the sliders to match your daily lifestyle, then request an estimate.</p>

            <div class="form-group">
                <label>Study hours per day: <span id="study_hours-value">6</span></label>
                <input type="range" id="study_hours" min="1" max="16" step="0.5" value="6">
                <div class="bounds"><span>1 h</span><span>16 h</span></div>
            </div>
            <div class="form-group">
                <label>Sleep hours per day: <span id="sleep_hours-value">7</span></label>
                <input type="range" id="sleep_hours" min="3" max="12" step="0.5" value="7">
                <div class="bounds"><span>3 h</span><span>12 h</span></div>
            </div>
            <div class="form-group">
                <label>Current GPA: <span id="gpa-value">3.0</span></label>
                <input type="range" id="gpa" min="1" max="4" step="0.1" value="3.0">
                <div class="bounds"><span>1.0</span><span>4.0</span></div>
            </div>
            <div class="form-group">
                <label>Physically active days per week: <span id="physical_activity-value">3</span></label>
                <input type="range" id="physical_activity" min="0" max="7" step="1" value="3">
                <div class="bounds"><span>0 days</span><span>7 days</span></div>
            </div>
            <div class="form-group">
                <label>Social days per week: <span id="social_activity-value">3</span></label>
                <input type="range" id="social_activity" min="0" max="7" step="1" value="3">
                <div class="bounds"><span>0 days</span><span>7 days</span></div>
            </div>

            <button id="estimate-button" onclick="estimate()">Predict Stress Level</button>

            <div id="result" class="result"></div>
        </div>

        <script>
            const fields = ['study_hours', 'sleep_hours', 'gpa', 'physical_activity', 'social_activity'];

            fields.forEach(field => {
                const slider = document.getElementById(field);
                slider.addEventListener('input', () => {
                    document.getElementById(field + '-value').textContent = slider.value;
                });
            });

            async function estimate() {
                const button = document.getElementById('estimate-button');
                const resultDiv = document.getElementById('result');
                const body = {};
                fields.forEach(field => { body[field] = parseFloat(document.getElementById(field).value); });

                button.disabled = true;
                button.textContent = 'Analysing...';
                resultDiv.style.display = 'block';
                resultDiv.className = 'result info';
                resultDiv.innerHTML = '<p>Analysing your data...</p>';

                try {
                    const response = await fetch('/estimate', {
                        method: 'POST',
                        headers: {'Content-Type': 'application/json'},
                        body: JSON.stringify(body)
                    });
                    const data = await response.json();
                    if (!response.ok) {
                        throw new Error(data.error);
                    }

                    const info = data.interpretation;
                    resultDiv.className = 'result ' + info.severity;
                    resultDiv.innerHTML = `
                        <h3>Predicted stress level: ${info.label.toUpperCase()}</h3>
                        <p><strong>Stress score:</strong> ${data.score_display}</p>
                        <p><strong>Confidence level:</strong> ${data.confidence_display}</p>
                        <p>${info.summary}</p>
                        <ul>${info.recommendations.map(r => `<li><strong>${r.title}:</strong> ${r.detail}</li>`).join('')}</ul>
                    `;
                } catch (error) {
                    resultDiv.className = 'result danger';
                    resultDiv.innerHTML = `<p>Error: ${error.message}</p>`;
                } finally {
                    button.disabled = false;
                    button.textContent = 'Predict Stress Level';
                }
            }
        </script>
    </body>
    </html>
    "#;
