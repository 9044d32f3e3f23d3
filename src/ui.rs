use crate::errors::AppError;
use crate::models::DashboardView;

pub fn render_index(view: &DashboardView) -> Result<String, AppError> {
    // A title containing "</script>" must not end the inline script early.
    let payload = serde_json::to_string(view)?.replace("</", "<\\/");
    Ok(INDEX_HTML
        .replace("{{MONTH}}", &escape_html(&view.calendar.month))
        .replace("{{INITIAL_VIEW}}", &payload))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{MONTH}} · Dashboard</title>
  <style>
    :root {
      --bg: #f4f6f8;
      --ink: #1f2933;
      --muted: #7b8794;
      --line: #e4e7eb;
      --done: #2f9e62;
      --notes: #3a6ed8;
      --accent: #8884d8;
      --card: #ffffff;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Noto Sans SC", "PingFang SC", "Helvetica Neue", sans-serif;
      padding: 24px 16px 48px;
    }

    .app {
      max-width: 1120px;
      margin: 0 auto;
      display: grid;
      gap: 16px;
    }

    .tabs {
      display: inline-flex;
      gap: 4px;
      padding: 4px;
      background: var(--line);
      border-radius: 10px;
      width: fit-content;
    }

    .tab {
      border: none;
      background: transparent;
      padding: 8px 18px;
      border-radius: 8px;
      font-size: 0.95rem;
      cursor: pointer;
      color: var(--muted);
    }

    .tab.active {
      background: var(--card);
      color: var(--ink);
      box-shadow: 0 2px 6px rgba(31, 41, 51, 0.12);
    }

    .card {
      background: var(--card);
      border: 1px solid var(--line);
      border-radius: 14px;
      padding: 20px;
    }

    .card-header {
      display: flex;
      align-items: center;
      justify-content: space-between;
      margin-bottom: 16px;
    }

    .card-header h2 {
      margin: 0;
      font-size: 1.3rem;
    }

    .nav button, .primary {
      border: 1px solid var(--line);
      background: var(--card);
      border-radius: 8px;
      padding: 6px 12px;
      cursor: pointer;
    }

    .primary {
      background: var(--ink);
      color: white;
      border-color: var(--ink);
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 8px;
    }

    .weekday {
      text-align: center;
      font-weight: 600;
      padding: 6px;
    }

    .day {
      border: 1px solid var(--line);
      border-radius: 8px;
      padding: 8px;
      min-height: 96px;
      cursor: pointer;
      font-size: 0.8rem;
    }

    .day:hover {
      background: #f8fafc;
    }

    .day.selected {
      border-color: var(--accent);
      box-shadow: inset 0 0 0 1px var(--accent);
    }

    .day .num {
      text-align: right;
      color: var(--muted);
      font-size: 0.9rem;
    }

    .day .tasks {
      color: var(--done);
    }

    .day .notes {
      color: var(--notes);
    }

    .row {
      display: flex;
      gap: 8px;
      margin-bottom: 12px;
    }

    input, textarea {
      flex: 1;
      width: 100%;
      border: 1px solid var(--line);
      border-radius: 8px;
      padding: 8px 10px;
      font: inherit;
    }

    textarea {
      min-height: 320px;
      margin-bottom: 8px;
      resize: vertical;
    }

    .list {
      max-height: 500px;
      overflow-y: auto;
    }

    .item {
      display: flex;
      align-items: center;
      gap: 10px;
      padding: 8px;
      border-radius: 8px;
    }

    .item:hover {
      background: #f1f5f9;
    }

    .item.done span {
      text-decoration: line-through;
      color: var(--muted);
    }

    .check {
      width: 28px;
      height: 28px;
      border-radius: 50%;
      border: 1px solid var(--line);
      background: var(--card);
      cursor: pointer;
      color: #cbd2d9;
    }

    .item.done .check {
      color: var(--done);
    }

    .note {
      display: block;
      cursor: pointer;
    }

    .note h4 {
      margin: 0 0 4px;
    }

    .note p {
      margin: 0;
      color: var(--muted);
      white-space: nowrap;
      overflow: hidden;
      text-overflow: ellipsis;
    }

    .split {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
      gap: 16px;
    }

    svg {
      width: 100%;
      display: block;
    }

    svg text {
      font-size: 11px;
      fill: var(--muted);
    }

    .legend {
      display: flex;
      gap: 16px;
      font-size: 0.85rem;
      margin-top: 8px;
    }

    [hidden] {
      display: none !important;
    }
  </style>
</head>
<body>
  <main class="app">
    <nav class="tabs" role="tablist">
      <button class="tab active" type="button" data-tab="calendar">日历</button>
      <button class="tab" type="button" data-tab="tasks">任务</button>
      <button class="tab" type="button" data-tab="notes">笔记</button>
      <button class="tab" type="button" data-tab="stats">统计</button>
    </nav>

    <section class="card" data-panel="calendar">
      <div class="card-header">
        <h2 id="month-title">{{MONTH}}</h2>
        <div class="nav">
          <button type="button" id="prev-month" aria-label="上个月">&lsaquo;</button>
          <button type="button" id="next-month" aria-label="下个月">&rsaquo;</button>
        </div>
      </div>
      <div class="grid" id="calendar-grid"></div>
    </section>

    <section class="card" data-panel="tasks" hidden>
      <div class="card-header">
        <h2 id="tasks-title">任务管理</h2>
      </div>
      <form class="row" id="task-form">
        <input id="task-input" placeholder="添加新任务..." autocomplete="off" />
        <button class="primary" type="submit">添加</button>
      </form>
      <div class="list" id="task-list"></div>
    </section>

    <section class="card" data-panel="notes" hidden>
      <div class="card-header">
        <h2 id="notes-title">笔记管理</h2>
      </div>
      <div class="split">
        <form id="note-form">
          <input id="note-title" placeholder="笔记标题" autocomplete="off" />
          <textarea id="note-content" placeholder="笔记内容..."></textarea>
          <div class="row">
            <button class="primary" type="submit" id="note-submit">添加</button>
            <button type="button" id="note-cancel" hidden>取消</button>
          </div>
        </form>
        <div class="list" id="note-list"></div>
      </div>
    </section>

    <section class="card" data-panel="stats" hidden>
      <div class="card-header">
        <h2>月度统计 · <span id="stats-month"></span></h2>
      </div>
      <svg id="summary-chart" viewBox="0 0 600 200" role="img" aria-label="汇总"></svg>
      <svg id="daily-chart" viewBox="0 0 900 300" role="img" aria-label="每日"></svg>
      <div class="legend">
        <span style="color:#82ca9d">● 已完成任务</span>
        <span style="color:#8884d8">● 总任务</span>
        <span style="color:#ffc658">● 笔记数量</span>
      </div>
    </section>
  </main>

  <script id="initial-view" type="application/json">{{INITIAL_VIEW}}</script>
  <script>
    const view = JSON.parse(document.getElementById('initial-view').textContent);
    const svgNs = 'http://www.w3.org/2000/svg';
    let activeTab = 'calendar';

    const el = (tag, attrs = {}, text) => {
      const node = document.createElement(tag);
      Object.entries(attrs).forEach(([key, value]) => node.setAttribute(key, value));
      if (text !== undefined) {
        node.textContent = text;
      }
      return node;
    };

    const svgEl = (tag, attrs = {}, text) => {
      const node = document.createElementNS(svgNs, tag);
      Object.entries(attrs).forEach(([key, value]) => node.setAttribute(key, value));
      if (text !== undefined) {
        node.textContent = text;
      }
      return node;
    };

    const api = async (method, path, body) => {
      const res = await fetch(path, {
        method,
        headers: body ? { 'content-type': 'application/json' } : {},
        body: body ? JSON.stringify(body) : undefined
      });
      if (!res.ok) {
        throw new Error((await res.text()) || res.statusText);
      }
      return res.json();
    };

    const renderCalendar = () => {
      const grid = document.getElementById('calendar-grid');
      grid.replaceChildren();
      document.getElementById('month-title').textContent = view.calendar.month;
      view.calendar.weekdays.forEach((name) => grid.appendChild(el('div', { class: 'weekday' }, name)));
      for (let i = 0; i < view.calendar.leading_blanks; i += 1) {
        grid.appendChild(el('div'));
      }
      view.calendar.days.forEach((day) => {
        const cell = el('div', { class: day.date === view.calendar.cursor ? 'day selected' : 'day' });
        cell.appendChild(el('div', { class: 'num' }, String(day.day)));
        cell.appendChild(el('div', { class: 'tasks' }, `任务: ${day.completed_tasks}/${day.total_tasks}`));
        cell.appendChild(el('div', { class: 'notes' }, `笔记: ${day.notes.length}`));
        cell.addEventListener('click', () => selectDate(day.date));
        grid.appendChild(cell);
      });
    };

    const renderTasks = () => {
      document.getElementById('tasks-title').textContent = `任务管理 - ${view.tasks.label}`;
      const list = document.getElementById('task-list');
      list.replaceChildren();
      view.tasks.tasks.forEach((task) => {
        const row = el('div', { class: task.completed ? 'item done' : 'item' });
        const check = el('button', { class: 'check', type: 'button' }, '✓');
        check.addEventListener('click', () => run(async () => {
          view.tasks = await api('POST', `/api/tasks/${task.id}/toggle`);
          await refreshDerived();
        }));
        row.appendChild(check);
        row.appendChild(el('span', {}, task.title));
        list.appendChild(row);
      });
    };

    const renderNotes = () => {
      document.getElementById('notes-title').textContent = `笔记管理 - ${view.notes.label}`;
      const editing = view.notes.editor.target !== null;
      document.getElementById('note-title').value = view.notes.editor.title;
      document.getElementById('note-content').value = view.notes.editor.content;
      document.getElementById('note-submit').textContent = editing ? '更新' : '添加';
      document.getElementById('note-cancel').hidden = !editing;
      const list = document.getElementById('note-list');
      list.replaceChildren();
      view.notes.notes.forEach((note) => {
        const item = el('div', { class: 'item note' });
        item.appendChild(el('h4', {}, note.title));
        item.appendChild(el('p', {}, note.content));
        item.addEventListener('click', () => run(async () => {
          view.notes = await api('POST', `/api/notes/${note.id}/select`);
          renderNotes();
        }));
        list.appendChild(item);
      });
    };

    const renderSummary = (svg, points) => {
      svg.replaceChildren();
      const max = Math.max(1, ...points.map((point) => point.value));
      const slot = 600 / points.length;
      points.forEach((point, index) => {
        const height = (point.value / max) * 150;
        const x = index * slot + slot * 0.25;
        svg.appendChild(svgEl('rect', { x, y: 170 - height, width: slot * 0.5, height, fill: '#8884d8' }));
        svg.appendChild(svgEl('text', { x: x + slot * 0.25, y: 165 - height, 'text-anchor': 'middle' }, String(point.value)));
        svg.appendChild(svgEl('text', { x: x + slot * 0.25, y: 190, 'text-anchor': 'middle' }, point.name));
      });
    };

    const renderDaily = (svg, points) => {
      svg.replaceChildren();
      const series = [
        ['completed_tasks', '#82ca9d'],
        ['total_tasks', '#8884d8'],
        ['notes', '#ffc658']
      ];
      const max = Math.max(1, ...points.flatMap((point) => series.map(([key]) => point[key])));
      const step = points.length > 1 ? 860 / (points.length - 1) : 0;
      const x = (index) => 20 + index * step;
      const y = (value) => 270 - (value / max) * 250;
      series.forEach(([key, color]) => {
        const d = points.map((point, index) => `${index === 0 ? 'M' : 'L'} ${x(index)} ${y(point[key])}`).join(' ');
        svg.appendChild(svgEl('path', { d, fill: 'none', stroke: color, 'stroke-width': 2 }));
      });
      points.forEach((point, index) => {
        if (index % 5 === 0) {
          svg.appendChild(svgEl('text', { x: x(index), y: 292, 'text-anchor': 'middle' }, point.date.slice(5)));
        }
      });
    };

    const renderStats = () => {
      document.getElementById('stats-month').textContent = view.stats.month;
      renderSummary(document.getElementById('summary-chart'), view.stats.summary);
      renderDaily(document.getElementById('daily-chart'), view.stats.daily);
    };

    const renderAll = () => {
      renderCalendar();
      renderTasks();
      renderNotes();
      renderStats();
    };

    const refreshDerived = async () => {
      const [calendar, stats] = await Promise.all([api('GET', '/api/calendar'), api('GET', '/api/stats')]);
      view.calendar = calendar;
      view.stats = stats;
      renderCalendar();
      renderStats();
    };

    const refreshAll = async () => {
      const [tasks, notes] = await Promise.all([api('GET', '/api/tasks'), api('GET', '/api/notes')]);
      view.tasks = tasks;
      view.notes = notes;
      await refreshDerived();
      renderTasks();
      renderNotes();
    };

    const run = (action) => {
      action().catch((err) => window.alert(err.message));
    };

    const selectDate = (date) => run(async () => {
      await api('POST', '/api/calendar/select', { date });
      await refreshAll();
    });

    const navigate = (direction) => run(async () => {
      await api('POST', '/api/calendar/navigate', { direction });
      await refreshAll();
    });

    const setActiveTab = (tab) => {
      activeTab = tab;
      document.querySelectorAll('.tab').forEach((button) => {
        button.classList.toggle('active', button.dataset.tab === tab);
      });
      document.querySelectorAll('[data-panel]').forEach((panel) => {
        panel.hidden = panel.dataset.panel !== activeTab;
      });
    };

    document.querySelectorAll('.tab').forEach((button) => {
      button.addEventListener('click', () => setActiveTab(button.dataset.tab));
    });
    document.getElementById('prev-month').addEventListener('click', () => navigate(-1));
    document.getElementById('next-month').addEventListener('click', () => navigate(1));

    document.getElementById('task-form').addEventListener('submit', (event) => {
      event.preventDefault();
      const input = document.getElementById('task-input');
      run(async () => {
        view.tasks = await api('POST', '/api/tasks', { title: input.value });
        if (input.value.trim()) {
          input.value = '';
        }
        renderTasks();
        await refreshDerived();
      });
    });

    document.getElementById('note-form').addEventListener('submit', (event) => {
      event.preventDefault();
      const title = document.getElementById('note-title').value;
      const content = document.getElementById('note-content').value;
      const path = view.notes.editor.target !== null ? '/api/notes/update' : '/api/notes';
      run(async () => {
        const notes = await api('POST', path, { title, content });
        const changed = notes.editor.target === null && title.trim() && content.trim();
        view.notes = notes;
        renderNotes();
        if (!changed) {
          document.getElementById('note-title').value = title;
          document.getElementById('note-content').value = content;
        }
        await refreshDerived();
      });
    });

    document.getElementById('note-cancel').addEventListener('click', () => run(async () => {
      view.notes = await api('POST', '/api/notes/cancel');
      renderNotes();
    }));

    renderAll();
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::Dashboard;
    use crate::handlers::dashboard_view;
    use chrono::NaiveDate;

    #[test]
    fn page_embeds_month_and_escapes_script_breakout() {
        let mut dashboard = Dashboard::new(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        dashboard.add_task("</script><script>alert(1)</script>");

        let page = render_index(&dashboard_view(&dashboard)).unwrap();
        assert!(page.contains("<title>2024年3月 · Dashboard</title>"));
        assert!(page.contains(r#"<h2 id="month-title">2024年3月</h2>"#));
        assert!(!page.contains("</script><script>alert(1)"));
        assert!(page.contains(r#"<\/script><script>alert(1)<\/script>"#));
        assert!(!page.contains("{{INITIAL_VIEW}}"));
    }
}
