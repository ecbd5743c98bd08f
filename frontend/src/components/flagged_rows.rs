//! Table of flagged rows with a per-row removal checkbox.

use leptos::*;

use crate::{AnalysisReport, AnalysisSession};

#[component]
pub fn FlaggedRowsTable(session: RwSignal<AnalysisSession>) -> impl IntoView {
    // Ticking a checkbox must not rebuild the table, so render from the
    // report alone.
    let report = create_memo(move |_| session.with(|s| s.results().map(|r| r.report().clone())));

    view! {
        <div id="inconsistencies-table-container">
            {move || match report.get() {
                None => ().into_view(),
                Some(report) if report.rows.is_empty() => view! {
                    <p class="no-inconsistency">"No inconsistencies found in this sheet!"</p>
                }
                .into_view(),
                Some(report) => render_table(session, report).into_view(),
            }}
        </div>
    }
}

fn render_table(session: RwSignal<AnalysisSession>, report: AnalysisReport) -> impl IntoView {
    let AnalysisReport { headers, rows } = report;

    let header_cells = headers
        .iter()
        .map(|header| view! { <th>{header.clone()}</th> })
        .collect_view();

    let body = rows
        .into_iter()
        .map(|row| {
            let row_index = row.row_index;
            let cells = headers
                .iter()
                .map(|header| view! { <td>{row.cell_text(header)}</td> })
                .collect_view();
            view! {
                <tr>
                    <td>
                        <input
                            type="checkbox"
                            class="remove-row-checkbox"
                            value=row_index.to_string()
                            prop:checked=move || {
                                session.with(|s| s.results().is_some_and(|r| r.is_marked(row_index)))
                            }
                            on:change=move |ev| {
                                let marked = event_target_checked(&ev);
                                session.update(|s| s.set_row_marked(row_index, marked));
                            }
                        />
                    </td>
                    {cells}
                    <td class="issue-cell">{row.issue.clone().unwrap_or_default()}</td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <table>
            <thead>
                <tr>
                    <th>"Remove?"</th>
                    {header_cells}
                    <th>"Issue"</th>
                </tr>
            </thead>
            <tbody>{body}</tbody>
        </table>
    }
}
