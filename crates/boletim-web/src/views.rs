//! HTML rendering for the portal pages.
//!
//! Pages are assembled with `format!` around a shared stylesheet. Every value
//! that comes from the user or the store goes through [`escape`].

use boletim_core::report::{Report, ReportEntry};

const STYLE: &str = r#"<style>
  @import url('https://fonts.googleapis.com/css2?family=Inter:wght@100..900&display=swap');
  :root {
    --primary: #004D99;
    --secondary: #333333;
    --card-bg: #FFFFFF;
    --page-bg: #F9F9F9;
    --text: #212529;
    --pass: #28A745;
    --fail: #DC3545;
    --card-shadow: 0 8px 20px rgba(0, 0, 0, 0.08);
  }
  body {
    font-family: 'Inter', sans-serif;
    background-color: var(--page-bg);
    color: var(--text);
    margin: 0;
    display: flex;
    justify-content: center;
    align-items: center;
    min-height: 100vh;
    box-sizing: border-box;
  }
  .portal-header {
    position: fixed;
    top: 0;
    left: 0;
    width: 100%;
    background-color: var(--primary);
    color: white;
    text-align: center;
    padding: 15px 0;
    font-weight: 700;
    font-size: 1.5em;
    box-shadow: 0 4px 8px rgba(0, 0, 0, 0.1);
    z-index: 1000;
  }
  .container { width: 90%; margin: 80px 0 20px 0; box-sizing: border-box; }
  .container.narrow { max-width: 500px; }
  .container.wide { max-width: 900px; }
  .card {
    background-color: var(--card-bg);
    padding: 40px;
    border-radius: 16px;
    box-shadow: var(--card-shadow);
    text-align: center;
    border: 1px solid #E9ECEF;
  }
  .card.table-card { padding: 0; text-align: left; border-radius: 0 0 16px 16px; border-top: none; }
  h2.login-title {
    color: var(--secondary);
    font-weight: 700;
    font-size: 1.8em;
    border-bottom: 2px solid #E9ECEF;
    padding-bottom: 15px;
  }
  label { display: block; text-align: left; font-weight: 600; margin: 15px 0 5px 0; color: var(--secondary); }
  input[type="text"], input[type="password"] {
    width: 100%;
    padding: 14px;
    margin: 5px 0 20px 0;
    border: 1px solid #ced4da;
    border-radius: 8px;
    box-sizing: border-box;
    font-size: 1em;
  }
  input:focus { border-color: var(--primary); outline: none; box-shadow: 0 0 0 4px rgba(0, 77, 153, 0.2); }
  button {
    background-color: var(--primary);
    color: white;
    padding: 15px 25px;
    border: none;
    border-radius: 8px;
    cursor: pointer;
    font-size: 1.1em;
    font-weight: 700;
    width: 100%;
    margin-top: 20px;
  }
  button:hover { background-color: #003366; }
  .error-message { color: var(--fail); margin-top: 15px; font-weight: 600; }
  .header-results {
    background: linear-gradient(135deg, var(--primary), #007BFF);
    color: white;
    padding: 30px 40px;
    border-radius: 16px 16px 0 0;
    text-align: left;
    box-shadow: var(--card-shadow);
  }
  .header-results h2 { margin: 0; font-size: 1.9em; font-weight: 700; }
  .header-results p { margin-top: 8px; font-size: 1.1em; opacity: 0.9; }
  table { width: 100%; border-collapse: collapse; text-align: left; background-color: var(--card-bg); }
  th, td { padding: 18px 40px; border-bottom: 1px solid #e9ecef; }
  th { background-color: #f8f9fa; color: var(--secondary); font-weight: 700; text-transform: uppercase; font-size: 0.9em; }
  tr:last-child td { border-bottom: none; }
  .score { font-weight: 700; font-size: 1.1em; }
  .pass { color: var(--pass); }
  .fail { color: var(--fail); }
  .average {
    background-color: rgba(255, 255, 255, 0.2);
    font-size: 1.2em;
    font-weight: 800;
    padding: 3px 10px;
    border-radius: 6px;
  }
  .back-link {
    display: inline-block;
    margin-top: 30px;
    color: var(--primary);
    text-decoration: none;
    font-weight: 600;
    padding: 10px 20px;
    border: 2px solid var(--primary);
    border-radius: 8px;
  }
  .back-link:hover { background-color: var(--primary); color: white; }
</style>"#;

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(input: &str) -> String {
  let mut out = String::with_capacity(input.len());
  for c in input.chars() {
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

fn document(title: &str, body: &str) -> String {
  format!(
    "<!DOCTYPE html>\n<html lang=\"pt-br\">\n<head>\n\
<meta charset=\"UTF-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
<title>{title}</title>\n{STYLE}\n</head>\n<body>\n{body}\n</body>\n</html>\n"
  )
}

/// The login form, with an optional error message under it.
pub fn login_page(error: Option<&str>) -> String {
  let error_html = error
    .map(|m| format!("<p class=\"error-message\">{}</p>", escape(m)))
    .unwrap_or_default();

  let body = format!(
    r#"<div class="portal-header">PORTAL DE CONSULTA</div>
<div class="container narrow">
  <div class="card">
    <h2 class="login-title">Faça seu Login</h2>
    <form method="POST" action="/">
      <label for="ra">RA (Registro Acadêmico):</label>
      <input type="text" id="ra" name="ra" placeholder="Apenas números, ex: 123456" pattern="[0-9]+" required>
      <label for="password">Senha:</label>
      <input type="password" id="password" name="password" placeholder="Qualquer senha" required>
      <button type="submit">Acessar Boletim</button>
    </form>
    {error_html}
  </div>
</div>"#
  );

  document("Login - Boletim Escolar", &body)
}

fn entry_row(entry: &ReportEntry) -> String {
  let (class, label) = if entry.status.is_pass() {
    ("pass", "APROVADO")
  } else {
    ("fail", "REPROVADO")
  };
  format!(
    "<tr><td>{subject}</td><td class=\"score {class}\">{score:.1}</td><td class=\"{class}\">{label}</td></tr>",
    subject = escape(entry.subject.as_ref()),
    score = entry.score,
  )
}

/// The grade report: header with name, RA and average, then one row per
/// subject.
pub fn results_page(report: &Report) -> String {
  let rows: String = report.entries.iter().map(entry_row).collect();

  let body = format!(
    r#"<div class="container wide">
  <div class="header-results">
    <p>BOLETIM ACADÊMICO</p>
    <h2>{name}</h2>
    <p>RA: {ra} | Média Geral: <span class="average">{average:.2}</span></p>
  </div>
  <div class="card table-card">
    <table>
      <thead><tr><th>Disciplina</th><th>Nota Final</th><th>Situação</th></tr></thead>
      <tbody>{rows}</tbody>
    </table>
  </div>
  <a href="/" class="back-link">← Sair do Portal</a>
</div>"#,
    name = escape(&report.display_name),
    ra = escape(&report.student_id),
    average = report.average,
  );

  document("Boletim de Notas", &body)
}
