use crate::milestones::MILESTONES;

pub fn render_index() -> String {
    let rows: String = MILESTONES
        .iter()
        .map(|m| {
            format!(
                r#"<li><span class="icon">{}</span><span class="when">{}</span><span>{}</span></li>"#,
                m.icon,
                m.label(),
                m.message
            )
        })
        .collect();

    INDEX_HTML
        .replace("{{MILESTONE_ROWS}}", &rows)
        .replace("{{MILESTONE_COUNT}}", &MILESTONES.len().to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Proof Tracker</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #0f172a;
      --bg-2: #1e293b;
      --ink: #e2e8f0;
      --muted: #94a3b8;
      --accent: #3b82f6;
      --accent-2: #a855f7;
      --danger: #ef4444;
      --card: rgba(30, 41, 59, 0.86);
      --shadow: 0 24px 60px rgba(2, 6, 23, 0.45);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, #1e3a8a, transparent 60%),
        linear-gradient(135deg, var(--bg-1), var(--bg-2) 60%, #111827 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1080px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 28px;
      animation: rise 600ms ease;
    }

    header {
      display: flex;
      flex-direction: column;
      align-items: center;
      gap: 10px;
      text-align: center;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2.2rem, 5vw, 3.2rem);
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: var(--muted);
    }

    .card {
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 24px;
      box-shadow: var(--shadow);
      border: 1px solid rgba(148, 163, 184, 0.15);
      padding: 28px;
    }

    .create {
      display: grid;
      gap: 14px;
    }

    .create .row {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
      gap: 12px;
    }

    input {
      width: 100%;
      padding: 14px 16px;
      border-radius: 14px;
      border: 2px solid rgba(148, 163, 184, 0.25);
      background: rgba(15, 23, 42, 0.7);
      color: var(--ink);
      font: inherit;
      color-scheme: dark;
    }

    button {
      border: none;
      border-radius: 14px;
      padding: 14px 18px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      color: white;
      background: var(--accent);
      transition: transform 150ms ease, box-shadow 150ms ease;
    }

    button:active {
      transform: scale(0.97);
    }

    button.past {
      background: var(--accent-2);
    }

    button.ghost {
      background: rgba(71, 85, 105, 0.5);
    }

    button.danger {
      background: rgba(239, 68, 68, 0.15);
      color: #fca5a5;
      border: 1px solid rgba(239, 68, 68, 0.35);
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(300px, 1fr));
      gap: 20px;
    }

    .tracker {
      display: grid;
      gap: 14px;
      position: relative;
      overflow: hidden;
    }

    .bar {
      position: absolute;
      top: 0;
      left: 0;
      height: 4px;
      background: linear-gradient(90deg, var(--accent), var(--accent-2));
      transition: width 400ms ease;
    }

    .tracker h3 {
      margin: 0;
      font-size: 1.4rem;
    }

    .clock {
      display: grid;
      grid-template-columns: repeat(4, 1fr);
      gap: 8px;
    }

    .clock div {
      background: rgba(15, 23, 42, 0.7);
      border-radius: 12px;
      padding: 10px 4px;
      text-align: center;
    }

    .clock .value {
      display: block;
      font-size: 1.6rem;
      font-weight: 600;
      font-variant-numeric: tabular-nums;
    }

    .clock .unit {
      font-size: 0.7rem;
      letter-spacing: 0.12em;
      color: var(--muted);
    }

    .badge {
      display: flex;
      justify-content: space-between;
      color: var(--muted);
      font-size: 0.9rem;
    }

    .recent {
      display: flex;
      gap: 10px;
      align-items: center;
      padding: 12px;
      border-radius: 12px;
      background: rgba(234, 179, 8, 0.12);
      color: #fde68a;
    }

    .history {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 6px;
    }

    .history li,
    .milestones li {
      display: flex;
      gap: 10px;
      align-items: center;
    }

    .empty {
      text-align: center;
      color: var(--muted);
    }

    .overlay {
      position: fixed;
      inset: 0;
      background: rgba(2, 6, 23, 0.8);
      display: none;
      place-items: center;
      padding: 24px;
      z-index: 10;
    }

    .overlay.open {
      display: grid;
    }

    .guide {
      max-width: 720px;
      max-height: 85vh;
      overflow-y: auto;
      display: grid;
      gap: 18px;
    }

    .guide header {
      flex-direction: row;
      justify-content: space-between;
      text-align: left;
    }

    .guide h2 {
      margin: 0;
    }

    .guide h3 {
      margin: 0 0 8px;
    }

    .guide p,
    .guide li {
      color: #cbd5e1;
    }

    .milestones {
      list-style: none;
      padding: 0;
      display: grid;
      gap: 8px;
    }

    .milestones .when {
      min-width: 72px;
      font-weight: 600;
      color: var(--ink);
    }

    footer {
      text-align: center;
      color: var(--muted);
      font-size: 0.85rem;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(16px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Proof Tracker</h1>
      <p class="subtitle">Track your discipline. Build your legacy. Prove yourself daily.</p>
      <button class="ghost" id="open-guide" type="button">How This Works</button>
    </header>

    <section class="card create">
      <h2>Create New Proof</h2>
      <input id="title" type="text" placeholder="e.g. NoFap, Quit Smoking, Early Wake-up..." />
      <div class="row">
        <button id="start-now" type="button">Start Now</button>
        <input id="custom-start" type="datetime-local" />
        <button class="past" id="start-past" type="button">Set Past Date</button>
      </div>
    </section>

    <section id="trackers"></section>

    <footer>Build discipline, one second at a time.</footer>
  </main>

  <div class="overlay" id="guide">
    <section class="card guide">
      <header>
        <h2>How Proof Tracker Works</h2>
        <button class="ghost" id="close-guide" type="button">Close</button>
      </header>
      <div>
        <h3>How to Use</h3>
        <ol>
          <li>Name your commitment (NoFap, Quit Smoking, Early Wake-up, etc.).</li>
          <li>Click "Start Now" to begin immediately, or pick when you actually started and click "Set Past Date".</li>
          <li>The timer updates every second. Earn milestone badges as the hours and days add up.</li>
          <li>Never break the chain. Reset only when you have to, and start again.</li>
        </ol>
      </div>
      <div>
        <h3>Milestone System ({{MILESTONE_COUNT}} badges)</h3>
        <ul class="milestones">{{MILESTONE_ROWS}}</ul>
      </div>
      <div>
        <h3>Pro Tips</h3>
        <ul>
          <li>Check your tracker every morning to reinforce the commitment.</li>
          <li>Track several habits to build a complete discipline system.</li>
          <li>If you relapse, reset immediately and start again.</li>
        </ul>
      </div>
    </section>
  </div>

  <script>
    const trackersEl = document.getElementById('trackers');
    const titleEl = document.getElementById('title');
    const customStartEl = document.getElementById('custom-start');
    const guideEl = document.getElementById('guide');
    let expandedId = null;
    let latest = [];

    const pad = (value) => String(value).padStart(2, '0');

    function escapeHtml(value) {
      return String(value)
        .replace(/&/g, '&amp;')
        .replace(/</g, '&lt;')
        .replace(/>/g, '&gt;')
        .replace(/"/g, '&quot;')
        .replace(/'/g, '&#39;');
    }

    function maxDateTime() {
      const now = new Date();
      now.setMinutes(now.getMinutes() - now.getTimezoneOffset());
      return now.toISOString().slice(0, 16);
    }

    function renderTracker(tracker) {
      const units = [
        ['DAYS', tracker.elapsed.days],
        ['HRS', tracker.elapsed.hours],
        ['MIN', tracker.elapsed.minutes],
        ['SEC', tracker.elapsed.seconds],
      ];
      const clock = units
        .map(([unit, value]) => `<div><span class="value">${pad(value)}</span><span class="unit">${unit}</span></div>`)
        .join('');
      const recent = tracker.recent
        ? `<div class="recent"><span>${tracker.recent.icon}</span><span>${escapeHtml(tracker.recent.message)}</span></div>`
        : '';
      const isOpen = expandedId === tracker.id;
      const toggle = tracker.achieved_count > 1
        ? `<button class="ghost" data-toggle="${escapeHtml(tracker.id)}" type="button">${isOpen ? 'Hide Milestones' : 'View All Milestones'}</button>`
        : '';
      const history = isOpen
        ? `<ul class="history">${tracker.achieved
            .map((m) => `<li><span>${m.icon}</span><span>${escapeHtml(m.message)}</span></li>`)
            .join('')}</ul>`
        : '';

      return `
        <article class="card tracker">
          <div class="bar" style="width: ${tracker.progress}%"></div>
          <h3>${escapeHtml(tracker.title)}</h3>
          <div class="clock">${clock}</div>
          <div class="badge">
            <span>${tracker.achieved_count} / ${tracker.milestone_count} Milestones</span>
            <span>${Math.round(tracker.progress)}%</span>
          </div>
          ${recent}
          ${toggle}
          ${history}
          <button class="danger" data-reset="${escapeHtml(tracker.id)}" type="button">Reset Proof</button>
        </article>`;
    }

    function render() {
      if (latest.length === 0) {
        trackersEl.className = '';
        trackersEl.innerHTML = '<p class="empty">No proofs yet. Start building your discipline above.</p>';
        return;
      }
      trackersEl.className = 'grid';
      trackersEl.innerHTML = latest.map(renderTracker).join('');
    }

    async function refresh() {
      const res = await fetch('/api/trackers');
      if (!res.ok) {
        return;
      }
      latest = await res.json();
      render();
    }

    async function create(start) {
      const body = { title: titleEl.value };
      if (start !== undefined) {
        body.start = start;
      }
      const res = await fetch('/api/trackers', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(body),
      });
      if (!res.ok) {
        alert(await res.text());
        return;
      }
      titleEl.value = '';
      customStartEl.value = '';
      await refresh();
    }

    async function reset(id) {
      if (!confirm('Are you sure you want to reset this tracker? This cannot be undone.')) {
        return;
      }
      const res = await fetch(`/api/trackers/${encodeURIComponent(id)}/reset`, {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ confirm: true }),
      });
      if (!res.ok) {
        alert(await res.text());
      }
      if (expandedId === id) {
        expandedId = null;
      }
      await refresh();
    }

    document.getElementById('start-now').addEventListener('click', () => create());
    document.getElementById('start-past').addEventListener('click', () => {
      // The picker value has no zone; resolve it in the browser's zone here.
      if (!customStartEl.value) {
        create('');
        return;
      }
      const picked = new Date(customStartEl.value);
      if (isNaN(picked.getTime())) {
        alert('Invalid date');
        return;
      }
      create(picked.toISOString());
    });
    document.getElementById('open-guide').addEventListener('click', () => guideEl.classList.add('open'));
    document.getElementById('close-guide').addEventListener('click', () => guideEl.classList.remove('open'));

    trackersEl.addEventListener('click', (event) => {
      const toggleId = event.target.closest('[data-toggle]')?.dataset.toggle;
      if (toggleId) {
        expandedId = expandedId === toggleId ? null : toggleId;
        render();
        return;
      }
      const resetId = event.target.closest('[data-reset]')?.dataset.reset;
      if (resetId) {
        reset(resetId);
      }
    });

    customStartEl.max = maxDateTime();
    refresh();
    setInterval(refresh, 1000);
  </script>
</body>
</html>
"#;
