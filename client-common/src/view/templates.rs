pub(super) const ALL: [(&str, &str); 10] = [
    ("alert.html", ALERT),
    ("info_card.html", INFO_CARD),
    ("progress_bar.html", PROGRESS_BAR),
    ("loading.html", LOADING),
    ("checksum_result.html", CHECKSUM_RESULT),
    ("verify_result.html", VERIFY_RESULT),
    ("password_report.html", PASSWORD_REPORT),
    ("feedback_list.html", FEEDBACK_LIST),
    ("strength_meter.html", STRENGTH_METER),
    ("breach_list.html", BREACH_LIST),
];

const ALERT: &str = r#"<div class="alert alert-{{ kind }} alert-dismissible fade show" role="alert"{% if auto_dismiss %} data-auto-dismiss="5000"{% endif %}>
  {{ message }}
  <button type="button" class="btn-close" data-bs-dismiss="alert" aria-label="Close"></button>
</div>"#;

const INFO_CARD: &str = r#"<div class="card border-{{ kind }} mb-3">
  <div class="card-header bg-{{ kind }} bg-opacity-25 text-{{ header_text }}"><strong>{{ title }}</strong></div>
  <div class="card-body">{{ content|safe }}</div>
</div>"#;

const PROGRESS_BAR: &str = r#"<div class="progress" style="height: 25px;">
  <div class="progress-bar progress-bar-striped progress-bar-animated bg-{{ kind }}" role="progressbar" style="width: {{ value }}%;" aria-valuenow="{{ value }}" aria-valuemin="0" aria-valuemax="100">{{ value }}%</div>
</div>"#;

const LOADING: &str = r#"<div class="text-center py-3">
  <div class="spinner-border text-primary" role="status">
    <span class="visually-hidden">Loading...</span>
  </div>
  <p class="mt-2">{{ text }}</p>
</div>"#;

const CHECKSUM_RESULT: &str = r#"<div class="card mt-3">
  <div class="card-header bg-success bg-opacity-25 text-success">
    <div class="d-flex justify-content-between align-items-center">
      <h5 class="mb-0">Checksum Generated</h5>
      <button type="button" id="copyChecksumBtn" class="btn btn-sm btn-outline-success">
        {% if copied %}<i class="bi bi-check"></i> Copied!{% else %}<i class="bi bi-clipboard"></i> Copy{% endif %}
      </button>
    </div>
  </div>
  <div class="card-body">
    <div class="mb-3">
      <h6>File</h6>
      <p class="text-muted">{{ filename }}</p>
    </div>
    <div class="mb-3">
      <h6>Algorithm</h6>
      <p class="text-muted">{{ algorithm|upper }}</p>
    </div>
    <div>
      <h6>Checksum</h6>
      <pre class="bg-light p-2 rounded overflow-auto"><code style="color:black;">{{ checksum }}</code></pre>
    </div>
  </div>
</div>
{{ explainer|safe }}"#;

const VERIFY_RESULT: &str = r#"<div class="card mt-3">
  <div class="card-header bg-{{ status }} bg-opacity-25 text-{{ status }}">
    <h5 class="mb-0">
      <i class="bi bi-{% if is_valid %}check-circle-fill{% else %}x-circle-fill{% endif %} me-2"></i>
      {% if is_valid %}Verification Successful{% else %}Verification Failed{% endif %}
    </h5>
  </div>
  <div class="card-body">
    <div class="mb-3">
      <h6>File</h6>
      <p class="text-muted">{{ filename }}</p>
    </div>
    <div class="mb-3">
      <h6>Expected Checksum</h6>
      <pre class="bg-light p-2 rounded overflow-auto"><code>{{ provided_checksum }}</code></pre>
    </div>
    <div class="mb-3">
      <h6>Calculated Checksum</h6>
      <pre class="bg-light p-2 rounded overflow-auto"><code>{{ calculated_checksum }}</code></pre>
    </div>
    <div class="alert alert-{{ status }}">
      {% if is_valid %}<strong>File integrity verified!</strong> The file has not been modified.{% else %}<strong>Integrity check failed!</strong> The file may be corrupted or tampered with.{% endif %}
    </div>
  </div>
</div>
{% if not is_valid %}{{ failure_help|safe }}{% endif %}"#;

const PASSWORD_REPORT: &str = r#"<div class="card mb-4">
  <div class="card-header bg-primary bg-opacity-25 text-primary">
    <h5 class="mb-0">Password Analysis Report</h5>
  </div>
  <div class="card-body">
    <div class="row">
      <div class="col-md-6">
        <h6>Strength Rating</h6>
        <p class="fs-4 fw-bold {{ text_class }}">{{ rating }}</p>

        <h6>Password Properties</h6>
        <ul class="list-group list-group-flush mb-3">
          <li class="list-group-item d-flex justify-content-between align-items-center">
            Length
            <span class="badge bg-secondary rounded-pill">{{ length }} characters</span>
          </li>
          {% for label, present in classes %}
          <li class="list-group-item d-flex justify-content-between align-items-center">
            {{ label }}
            <span class="badge {% if present %}bg-success{% else %}bg-danger{% endif %} rounded-pill">{% if present %}Yes{% else %}No{% endif %}</span>
          </li>
          {% endfor %}
        </ul>
      </div>
      <div class="col-md-6">
        <h6>Entropy</h6>
        <p class="fs-5">{{ entropy }} bits</p>
        <div class="progress mb-3" style="height: 20px;">
          <div class="progress-bar bg-info" role="progressbar" style="width: {{ entropy_width }}%;" aria-valuenow="{{ entropy }}" aria-valuemin="0" aria-valuemax="128">
            {{ entropy }} bits
          </div>
        </div>
        <p class="small text-muted">Entropy measures the randomness and unpredictability of your password.
        Higher values mean greater security. Values above 60 bits are good for general use,
        while critical applications should exceed 80 bits.</p>

        <h6>Time to Crack (Estimated)</h6>
        <p class="fs-5">{{ crack_time }}</p>
        <p class="small text-muted">Based on entropy and assuming a modern attacker with multiple GPUs
        capable of billions of attempts per second.</p>
      </div>
    </div>
  </div>
</div>"#;

const FEEDBACK_LIST: &str = r#"{% if placeholder %}<li class="list-group-item text-center py-3">
  <i class="bi bi-arrow-up-circle me-2"></i>
  Enter a password above to receive analysis and recommendations.
</li>{% else %}{% for item in items %}<li class="list-group-item">{{ item }}</li>
{% endfor %}{% endif %}"#;

const STRENGTH_METER: &str = r#"<div class="progress">
  <div id="strengthMeter" class="{{ class }}" role="progressbar" style="width: {{ width }}%;" aria-valuenow="{{ width }}" aria-valuemin="0" aria-valuemax="100"></div>
</div>
<span id="strengthLabel" class="{{ label_class }}">{{ label }}</span>"#;

const BREACH_LIST: &str = r#"{% if breaches %}{% for b in breaches %}<div class="card mb-3">
  <div class="card-header bg-danger bg-opacity-25 text-danger"><strong>{{ b.Title }}</strong>{% if b.demo %} <span class="badge bg-secondary">Demo</span>{% endif %}</div>
  <div class="card-body">
    <p>{{ b.Description }}</p>
    <p class="small text-muted">Breach date: {{ b.BreachDate }} &middot; {{ b.PwnCount }} accounts</p>
    <p class="small">Compromised data: {{ b.DataClasses|join(", ") }}</p>
  </div>
</div>
{% endfor %}{% else %}<div class="alert alert-success">No breaches found for this email address.</div>{% endif %}"#;
