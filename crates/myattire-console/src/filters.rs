/*
[INPUT]:  Task rows fetched from the API
[OUTPUT]: Filtered task lists and dashboard tallies
[POS]:    Domain layer - list views and summary cards
[UPDATE]: When adding new filter dimensions
*/

use chrono::{DateTime, Utc};
use myattire_adapter::{Priority, Task, TaskStatus};

/// Filters applied to the task list views. `None` keeps the "todos"
/// behaviour of showing everything for that dimension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilters {
    pub status: Option<TaskStatus>,
    pub prioridade: Option<Priority>,
    pub setor: Option<String>,
    /// Restrict to one assignee, set for the employee view
    pub funcionario: Option<String>,
    /// Case-insensitive substring over title and description
    pub busca: String,
}

impl TaskFilters {
    /// Filters for an employee who only ever sees their own tasks
    pub fn for_funcionario(nome: impl Into<String>) -> Self {
        Self {
            funcionario: Some(nome.into()),
            ..Self::default()
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        if let Some(status) = self.status
            && task.status != status
        {
            return false;
        }
        if let Some(prioridade) = self.prioridade
            && task.prioridade != prioridade
        {
            return false;
        }
        if let Some(setor) = &self.setor
            && !task.setor.eq_ignore_ascii_case(setor)
        {
            return false;
        }
        if let Some(funcionario) = &self.funcionario
            && !task.funcionario.eq_ignore_ascii_case(funcionario)
        {
            return false;
        }
        if !self.busca.is_empty() {
            let busca = self.busca.to_lowercase();
            return task.titulo.to_lowercase().contains(&busca)
                || task.descricao.to_lowercase().contains(&busca);
        }
        true
    }

    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        tasks
            .iter()
            .filter(|task| self.matches(task))
            .cloned()
            .collect()
    }

    /// Advance the status filter: todos -> pendente -> em andamento ->
    /// concluida -> todos
    pub fn cycle_status(&mut self) {
        self.status = match self.status {
            None => Some(TaskStatus::Pendente),
            Some(TaskStatus::Pendente) => Some(TaskStatus::EmAndamento),
            Some(TaskStatus::EmAndamento) => Some(TaskStatus::Concluida),
            Some(TaskStatus::Concluida) => None,
        };
    }

    /// Advance the priority filter through todos and the four levels
    pub fn cycle_prioridade(&mut self) {
        self.prioridade = match self.prioridade {
            None => Some(Priority::Critica),
            Some(prioridade) => {
                let index = Priority::ALL.iter().position(|p| *p == prioridade);
                match index {
                    Some(i) if i + 1 < Priority::ALL.len() => Some(Priority::ALL[i + 1]),
                    _ => None,
                }
            }
        };
    }

    pub fn status_label(&self) -> &str {
        match self.status {
            Some(status) => status.label(),
            None => "Todos",
        }
    }

    pub fn prioridade_label(&self) -> &str {
        match self.prioridade {
            Some(prioridade) => prioridade.label(),
            None => "Todas",
        }
    }

    pub fn setor_label(&self) -> &str {
        match &self.setor {
            Some(setor) => setor.as_str(),
            None => "Todos",
        }
    }
}

/// Totals for the dashboard cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub total: usize,
    pub pendente: usize,
    pub em_andamento: usize,
    pub concluida: usize,
    pub atrasadas: usize,
}

impl TaskCounts {
    pub fn tally(tasks: &[Task], now: DateTime<Utc>) -> Self {
        let mut counts = Self {
            total: tasks.len(),
            ..Self::default()
        };
        for task in tasks {
            match task.status {
                TaskStatus::Pendente => counts.pendente += 1,
                TaskStatus::EmAndamento => counts.em_andamento += 1,
                TaskStatus::Concluida => counts.concluida += 1,
            }
            if task.is_overdue(now) {
                counts.atrasadas += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use myattire_adapter::Priority;

    fn task(titulo: &str, funcionario: &str, setor: &str, status: TaskStatus) -> Task {
        Task {
            id: None,
            titulo: titulo.to_string(),
            descricao: format!("Descrição de {titulo}"),
            funcionario: funcionario.to_string(),
            setor: setor.to_string(),
            prazo: Some(Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()),
            prioridade: Priority::Media,
            status,
            data_criacao: None,
        }
    }

    fn sample_tasks() -> Vec<Task> {
        vec![
            task("Inventário de camisas", "Maria Souza", "Estoque", TaskStatus::Pendente),
            task("Vitrine de inverno", "João Lima", "Vendas", TaskStatus::EmAndamento),
            task("Fechamento do caixa", "Maria Souza", "Vendas", TaskStatus::Concluida),
        ]
    }

    #[test]
    fn default_filters_keep_everything() {
        let tasks = sample_tasks();
        assert_eq!(TaskFilters::default().apply(&tasks).len(), 3);
    }

    #[test]
    fn status_and_sector_narrow_the_list() {
        let tasks = sample_tasks();
        let filters = TaskFilters {
            status: Some(TaskStatus::Concluida),
            setor: Some("vendas".to_string()),
            ..TaskFilters::default()
        };

        let filtered = filters.apply(&tasks);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].titulo, "Fechamento do caixa");
    }

    #[test]
    fn busca_matches_title_and_description_case_insensitively() {
        let tasks = sample_tasks();
        let mut filters = TaskFilters {
            busca: "VITRINE".to_string(),
            ..TaskFilters::default()
        };
        assert_eq!(filters.apply(&tasks).len(), 1);

        // Description hits count too
        filters.busca = "descrição de fechamento".to_string();
        assert_eq!(filters.apply(&tasks).len(), 1);

        filters.busca = "nada disso".to_string();
        assert!(filters.apply(&tasks).is_empty());
    }

    #[test]
    fn funcionario_filter_only_shows_own_tasks() {
        let tasks = sample_tasks();
        let filters = TaskFilters::for_funcionario("maria souza");

        let filtered = filters.apply(&tasks);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|t| t.funcionario == "Maria Souza"));
    }

    #[test]
    fn prioridade_filter_and_cycle() {
        let mut tasks = sample_tasks();
        tasks[1].prioridade = Priority::Critica;

        let filters = TaskFilters {
            prioridade: Some(Priority::Critica),
            ..TaskFilters::default()
        };
        let filtered = filters.apply(&tasks);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].titulo, "Vitrine de inverno");

        let mut filters = TaskFilters::default();
        assert_eq!(filters.prioridade_label(), "Todas");
        filters.cycle_prioridade();
        assert_eq!(filters.prioridade, Some(Priority::Critica));
        for _ in 0..3 {
            filters.cycle_prioridade();
        }
        assert_eq!(filters.prioridade, Some(Priority::Baixa));
        filters.cycle_prioridade();
        assert_eq!(filters.prioridade, None);
    }

    #[test]
    fn status_cycle_returns_to_todos() {
        let mut filters = TaskFilters::default();
        assert_eq!(filters.status_label(), "Todos");

        filters.cycle_status();
        assert_eq!(filters.status, Some(TaskStatus::Pendente));
        filters.cycle_status();
        filters.cycle_status();
        assert_eq!(filters.status, Some(TaskStatus::Concluida));
        filters.cycle_status();
        assert_eq!(filters.status, None);
    }

    #[test]
    fn tally_counts_statuses_and_overdue() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
        let mut tasks = sample_tasks();
        // Push one deadline past "now"; the completed task never counts as late
        tasks[2].prazo = Some(now - Duration::days(1));

        let counts = TaskCounts::tally(&tasks, now);
        assert_eq!(counts.total, 3);
        assert_eq!(counts.pendente, 1);
        assert_eq!(counts.em_andamento, 1);
        assert_eq!(counts.concluida, 1);
        // Both open tasks carry the 2026-03-01 deadline, already past
        assert_eq!(counts.atrasadas, 2);
    }
}
