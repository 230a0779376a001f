//! Embedded single-page upload UI served at `/`.
//!
//! Kept as a static string so the binary ships self-contained; the page only
//! talks to the JSON API under `/api`.

pub const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>tracecase — requirements to test cases</title>
<style>
  body { font-family: system-ui, sans-serif; max-width: 960px; margin: 2rem auto; padding: 0 1rem; color: #1c2733; }
  h1 { font-size: 1.4rem; }
  fieldset { border: 1px solid #cfd8e3; border-radius: 8px; margin-bottom: 1rem; padding: 1rem; }
  label { display: block; margin: .5rem 0 .25rem; font-weight: 600; }
  select, textarea, input[type=file] { width: 100%; box-sizing: border-box; }
  textarea { min-height: 4rem; }
  button { padding: .5rem 1.25rem; border-radius: 6px; border: none; background: #175cd3; color: #fff; cursor: pointer; }
  button:disabled { background: #9db2ce; cursor: wait; }
  #error { color: #b42318; white-space: pre-wrap; }
  #raw { white-space: pre-wrap; background: #f4f6f8; padding: 1rem; border-radius: 8px; }
  table { border-collapse: collapse; width: 100%; font-size: .85rem; }
  th, td { border: 1px solid #cfd8e3; padding: .35rem .5rem; text-align: left; vertical-align: top; }
  th { background: #eef2f7; }
</style>
</head>
<body>
<h1>Healthcare requirements &rarr; compliant test cases</h1>
<p>Upload a requirements document (PDF, DOCX, TXT, or Markdown), pick a
compliance standard, and download the generated traceability matrix as CSV.</p>

<fieldset>
  <label for="file">Requirements document</label>
  <input type="file" id="file" accept=".pdf,.docx,.txt,.md">

  <label for="standard">Compliance standard</label>
  <select id="standard"></select>

  <label for="instructions">Additional instructions (optional)</label>
  <textarea id="instructions" placeholder="e.g. emphasize negative test cases"></textarea>

  <p>
    <button id="generate">Generate test cases</button>
    <button id="download" disabled>Download CSV</button>
  </p>
</fieldset>

<p id="error"></p>
<div id="result"></div>

<script>
(function () {
  'use strict';

  const fileInput = document.getElementById('file');
  const standardSelect = document.getElementById('standard');
  const instructionsInput = document.getElementById('instructions');
  const generateButton = document.getElementById('generate');
  const downloadButton = document.getElementById('download');
  const errorBox = document.getElementById('error');
  const resultBox = document.getElementById('result');

  let lastCsv = null;
  let lastCsvName = 'test_cases.csv';

  fetch('/api/standards')
    .then((resp) => resp.json())
    .then((standards) => {
      for (const name of standards) {
        const option = document.createElement('option');
        option.value = name;
        option.textContent = name;
        standardSelect.appendChild(option);
      }
    })
    .catch(() => { errorBox.textContent = 'Failed to load standards.'; });

  function readFileAsBase64(file) {
    return new Promise((resolve, reject) => {
      const reader = new FileReader();
      reader.onload = () => resolve(reader.result.split(',', 2)[1]);
      reader.onerror = () => reject(new Error('Could not read the file.'));
      reader.readAsDataURL(file);
    });
  }

  function renderReport(report) {
    resultBox.innerHTML = '';
    if (!report.structured) {
      const note = document.createElement('p');
      note.textContent = 'The agent response could not be parsed into a table; raw output below.';
      const raw = document.createElement('div');
      raw.id = 'raw';
      raw.textContent = report.raw_output;
      resultBox.appendChild(note);
      resultBox.appendChild(raw);
      return;
    }

    const columns = [
      ['requirement_id', 'Requirement ID'],
      ['test_case_id', 'Test Case ID'],
      ['case_type', 'Type'],
      ['priority', 'Priority'],
      ['scenario', 'Test Scenario'],
      ['expected_result', 'Expected Result'],
      ['compliance_tags', 'Compliance Tags'],
    ];

    const table = document.createElement('table');
    const head = table.insertRow();
    for (const [, label] of columns) {
      const th = document.createElement('th');
      th.textContent = label;
      head.appendChild(th);
    }
    for (const record of report.test_cases) {
      const row = table.insertRow();
      for (const [key] of columns) {
        row.insertCell().textContent = record[key];
      }
    }

    const summary = document.createElement('p');
    summary.textContent = report.row_count + ' test cases generated.';
    resultBox.appendChild(summary);
    resultBox.appendChild(table);
  }

  generateButton.addEventListener('click', async () => {
    errorBox.textContent = '';
    resultBox.innerHTML = '';
    downloadButton.disabled = true;
    lastCsv = null;

    const file = fileInput.files[0];
    if (!file) {
      errorBox.textContent = 'Choose a requirements document first.';
      return;
    }

    generateButton.disabled = true;
    try {
      const body = {
        file_name: file.name,
        content_base64: await readFileAsBase64(file),
        standard: standardSelect.value,
        instructions: instructionsInput.value || null,
      };
      const resp = await fetch('/api/generate', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(body),
      });
      if (!resp.ok) {
        errorBox.textContent = await resp.text();
        return;
      }
      const report = await resp.json();
      renderReport(report);
      if (report.csv) {
        lastCsv = report.csv;
        lastCsvName = report.csv_file_name;
        downloadButton.disabled = false;
      }
    } catch (err) {
      errorBox.textContent = err.message || String(err);
    } finally {
      generateButton.disabled = false;
    }
  });

  downloadButton.addEventListener('click', () => {
    if (!lastCsv) return;
    const blob = new Blob([lastCsv], { type: 'text/csv' });
    const link = document.createElement('a');
    link.href = URL.createObjectURL(blob);
    link.download = lastCsvName;
    link.click();
    URL.revokeObjectURL(link.href);
  });
})();
</script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_wires_the_api() {
        assert!(INDEX_HTML.contains("/api/standards"));
        assert!(INDEX_HTML.contains("/api/generate"));
    }
}
